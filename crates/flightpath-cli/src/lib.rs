//! Flightpath CLI library.
//!
//! This crate provides command-line interface utilities for the flight route
//! finder, including terminal styling, output formatting, and subcommand
//! handlers.

pub mod commands;
pub mod output;
pub mod terminal;
