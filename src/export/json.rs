//! JSON export of balances tables

use std::io::Write;

use crate::error::BalancesResult;
use crate::reports::Table;

/// Write a table as a pretty-printed JSON array of rows
pub fn export_table_json<W: Write>(table: &Table, writer: &mut W) -> BalancesResult<()> {
    serde_json::to_writer_pretty(&mut *writer, table)?;
    writeln!(writer)?;
    Ok(())
}
