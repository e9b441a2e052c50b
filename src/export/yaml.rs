//! YAML export of balances tables

use std::io::Write;

use crate::error::BalancesResult;
use crate::reports::Table;

/// Write a table as a YAML sequence of rows
pub fn export_table_yaml<W: Write>(table: &Table, writer: &mut W) -> BalancesResult<()> {
    serde_yaml::to_writer(writer, table)?;
    Ok(())
}
