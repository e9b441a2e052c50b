//! CSV export of balances tables

use std::io::Write;

use crate::error::BalancesResult;
use crate::reports::Table;

/// Write a table as CSV, one record per row
///
/// Ragged rows are allowed; empty cells become empty fields.
pub fn export_table_csv<W: Write>(table: &Table, writer: W) -> BalancesResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    for row in table {
        csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::reports::Cell;
    use chrono::NaiveDate;

    #[test]
    fn test_export_table_csv() {
        let table = vec![
            vec![Cell::Empty, Cell::text("Cash, petty"), Cell::text("Bank")],
            vec![
                Cell::Date(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()),
                Cell::Number(Money::new(1050, 2)),
                Cell::Number(Money::new(-3, 0)),
            ],
        ];
        let mut output = Vec::new();
        export_table_csv(&table, &mut output).unwrap();
        let csv_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();
        assert_eq!(lines[0], ",\"Cash, petty\",Bank");
        assert_eq!(lines[1], "2023-01-31,10.5,-3");
    }

    #[test]
    fn test_export_empty_table() {
        let mut output = Vec::new();
        export_table_csv(&Vec::new(), &mut output).unwrap();
        assert!(output.is_empty());
    }
}
