//! Configuration module for balances-report
//!
//! This module provides:
//! - Config path resolution
//! - Book display settings persistence

pub mod paths;
pub mod settings;

pub use paths::BalancesPaths;
pub use settings::{BookSettings, DecimalSeparator};
