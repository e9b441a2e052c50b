//! Reports module for balances-report
//!
//! Provides the balances aggregation tree and its table renderings.

pub mod balances;
pub mod flatten;
pub mod table;

pub use balances::BalancesReport;
pub use flatten::{compare_containers, flatten, Expansion, FlatRow, Flattened, INDENT_WIDTH};
pub use table::{transpose, BalanceType, BalancesTableBuilder, Cell, Table};
