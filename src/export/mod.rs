//! Export module for balances-report
//!
//! Writes rendered balances tables in machine-readable formats:
//! - CSV: spreadsheet-compatible rows
//! - JSON: array of rows with numeric amounts
//! - YAML: human-readable rows

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_table_csv;
pub use json::export_table_json;
pub use yaml::export_table_yaml;
