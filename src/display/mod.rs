//! Display formatting for terminal output
//!
//! Provides locale formatting of amounts and dates and terminal rendering
//! of balances tables.

pub mod format;
pub mod table;

pub use format::{format_date, format_value};
pub use table::format_table;
