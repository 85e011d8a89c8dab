use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use flightpath_cli::commands::airports::handle_airports_command;
use flightpath_cli::commands::load_planner;
use flightpath_cli::commands::route::{handle_route_command, RouteCommandArgs};
use flightpath_cli::output::OutputFormat;
use flightpath_lib::{Error as LibError, RoutePolicy, DEFAULT_TIE_BREAK_THRESHOLD};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find reliable flight routes from punctuality statistics")]
struct Cli {
    /// Override the dataset directory or CSV file path.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Cancellation-rate gap, in percentage points, within which the lower-delay route wins.
    #[arg(long, default_value_t = DEFAULT_TIE_BREAK_THRESHOLD, global = true)]
    threshold: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the most reliable itinerary between two airports.
    Route {
        /// Departure airport name.
        #[arg(long = "from")]
        from: String,
        /// Arrival airport name.
        #[arg(long = "to")]
        to: String,
    },
    /// List known airports, or the direct destinations of one airport.
    Airports {
        /// Only list airports reachable by a direct flight from this airport.
        #[arg(long = "from")]
        from: Option<String>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.threshold.is_finite() || cli.threshold < 0.0 {
        anyhow::bail!("--threshold must be a non-negative number");
    }
    let policy = RoutePolicy {
        tie_break_threshold: cli.threshold,
    };
    let planner = load_planner(cli.dataset.as_deref(), policy)?;

    match cli.command {
        Command::Route { from, to } => {
            let args = RouteCommandArgs { from, to };
            handle_route_command(&planner, cli.format, &args)
                .with_context(|| format!("route from '{}' to '{}' failed", args.from, args.to))
        }
        Command::Airports { from } => {
            handle_airports_command(&planner, cli.format, from.as_deref())
        }
    }
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<LibError>() {
        Some(LibError::InvalidQuery { reason }) => {
            eprintln!("Error: invalid query: {reason}");
        }
        Some(lib @ LibError::UnknownAirport { .. }) => {
            eprintln!("Error: {lib}");
            eprintln!("Run `flightpath-cli airports` to list known airports.");
        }
        Some(lib @ LibError::RouteNotFound { .. }) => {
            eprintln!("Error: {lib}");
        }
        _ => eprintln!("Error: {err:#}"),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
