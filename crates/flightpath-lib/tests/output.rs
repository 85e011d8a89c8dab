mod common;

use flightpath_lib::{load_flight_records, ItinerarySummary, RoutePlanner, RouteRenderMode};

use common::fixture_csv_path;

#[test]
fn summary_totals_match_hops() {
    let records = load_flight_records(&fixture_csv_path()).expect("fixture loads");
    let planner = RoutePlanner::new(&records);
    let itinerary = planner
        .find_flight_path("EDINBURGH", "DUBAI")
        .expect("route exists");

    let summary = ItinerarySummary::from_itinerary(&itinerary).expect("summary");
    assert_eq!(summary.start, "EDINBURGH");
    assert_eq!(summary.goal, "DUBAI");
    assert_eq!(summary.hops, 2);
    assert!((summary.total_cancellation_rate - 1.1).abs() < 1e-9);
    assert!((summary.total_average_delay_minutes - 25.0).abs() < 1e-9);

    let text = summary.render(RouteRenderMode::PlainText);
    assert!(text.contains("EDINBURGH -> LONDON HEATHROW via BRITISH AIRWAYS"));
    assert!(text.contains("LONDON HEATHROW -> DUBAI via EMIRATES"));
}

#[test]
fn summary_serialises_with_snake_case_tags() {
    let records = load_flight_records(&fixture_csv_path()).expect("fixture loads");
    let planner = RoutePlanner::new(&records);
    let itinerary = planner
        .find_flight_path("ABERDEEN", "AMSTERDAM")
        .expect("route exists");
    let summary = ItinerarySummary::from_itinerary(&itinerary).expect("summary");

    let json = serde_json::to_value(&summary).expect("serialises");
    assert_eq!(json["source"], "direct");
    assert_eq!(json["objective"], "cancellation_rate");
    assert_eq!(json["flights"][0]["airline"], "EASTERN AIRWAYS");
    assert_eq!(json["flights"][0]["average_delay_minutes"], 25.0);
}
