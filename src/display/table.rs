//! Terminal rendering of balances tables

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use crate::reports::{Cell, Table};

/// Format a balances table for the terminal
///
/// Numeric columns are right-aligned when every non-empty cell below the
/// first row is a number.
pub fn format_table(table: &Table) -> String {
    if table.is_empty() {
        return "No balances found.".to_string();
    }

    let width = table.iter().map(Vec::len).max().unwrap_or(0);
    let mut builder = Builder::default();
    for row in table {
        let mut record: Vec<String> = row.iter().map(Cell::to_string).collect();
        record.resize(width, String::new());
        builder.push_record(record);
    }

    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    for column in numeric_columns(table, width) {
        rendered.with(Modify::new(Columns::single(column)).with(Alignment::right()));
    }
    rendered.to_string()
}

fn numeric_columns(table: &Table, width: usize) -> Vec<usize> {
    (0..width)
        .filter(|column| {
            let mut cells = table
                .iter()
                .skip(1)
                .filter_map(|row| row.get(*column))
                .filter(|cell| !matches!(cell, Cell::Empty))
                .peekable();
            cells.peek().is_some() && cells.all(|cell| matches!(cell, Cell::Number(_)))
        })
        .collect()
}
