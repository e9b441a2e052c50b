//! balances-report - ledger balance containers and balance reports
//!
//! This library turns the result of a balance query into a tree of balance
//! containers (accounts and groups), keeps that tree consistent when
//! accounts are added to or removed from groups, and renders it as
//! spreadsheet-style tables.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Book display settings and path management
//! - `error`: Custom error types
//! - `models`: Decimal amounts, balance points, containers and payloads
//! - `reports`: The balances tree, flattening and table building
//! - `display`: Locale formatting and terminal tables
//! - `export`: CSV, JSON and YAML table writers
//! - `services`: Balance query sources
//! - `logging`: Tracing subscriber setup
//! - `cli`: Command handlers for the `balances` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use balances::config::BookSettings;
//! use balances::reports::{BalanceType, BalancesReport};
//!
//! let report = BalancesReport::from_json(&json)?;
//! let settings = BookSettings::default();
//! let table = report
//!     .create_table(&settings)
//!     .balance_type(BalanceType::Cumulative)
//!     .build()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{BalancesError, BalancesResult};
