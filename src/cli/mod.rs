//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report layer.

pub mod report;

pub use report::{handle_report_command, OutputFormat, ReportCommands};
