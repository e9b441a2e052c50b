//! Balances table building
//!
//! Renders a flattened container tree into a 2-D table, either as a total
//! snapshot (one row per container) or as a time series (one row per
//! balance date, one column per container).

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::config::BookSettings;
use crate::display::{format_date, format_value};
use crate::error::BalancesResult;
use crate::models::{BalancesContainer, ContainerId, Money};

use super::balances::BalancesReport;
use super::flatten::{flatten, Expansion, Flattened};

/// Which balances the table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceType {
    /// One total per container
    #[default]
    Total,
    /// Period balances over time
    Period,
    /// Cumulative balances over time
    Cumulative,
}

impl BalanceType {
    /// Parse balance type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "total" => Some(Self::Total),
            "period" => Some(Self::Period),
            "cumulative" => Some(Self::Cumulative),
            _ => None,
        }
    }
}

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Money),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Number(value) => write!(f, "{}", value),
            Self::Date(date) => write!(f, "{}", date),
            Self::Empty => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(value) => serializer.serialize_f64(value.to_f64()),
            Self::Date(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            Self::Empty => serializer.serialize_str(""),
        }
    }
}

/// A rendered 2-D table
pub type Table = Vec<Vec<Cell>>;

/// Configurable renderer of a report's containers
#[derive(Debug, Clone)]
pub struct BalancesTableBuilder<'a> {
    report: &'a BalancesReport,
    roots: Vec<ContainerId>,
    settings: &'a BookSettings,
    balance_type: BalanceType,
    format_dates: bool,
    format_values: bool,
    expansion: Expansion,
    transposed: bool,
    hide_dates: bool,
    hide_names: bool,
    include_properties: bool,
    trial: bool,
    period: bool,
    raw: bool,
}

impl<'a> BalancesTableBuilder<'a> {
    pub fn new(
        report: &'a BalancesReport,
        roots: Vec<ContainerId>,
        settings: &'a BookSettings,
    ) -> Self {
        Self {
            report,
            roots,
            settings,
            balance_type: BalanceType::Total,
            format_dates: false,
            format_values: false,
            expansion: Expansion::Off,
            transposed: false,
            hide_dates: false,
            hide_names: false,
            include_properties: false,
            trial: false,
            period: false,
            raw: false,
        }
    }

    pub fn balance_type(mut self, balance_type: BalanceType) -> Self {
        self.balance_type = balance_type;
        self
    }

    /// Render dates as text using the book pattern
    pub fn format_dates(mut self, format: bool) -> Self {
        self.format_dates = format;
        self
    }

    /// Render amounts as text using the book separators
    pub fn format_values(mut self, format: bool) -> Self {
        self.format_values = format;
        self
    }

    pub fn expanded(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Swap rows and columns
    pub fn transposed(mut self, transposed: bool) -> Self {
        self.transposed = transposed;
        self
    }

    pub fn hide_dates(mut self, hide: bool) -> Self {
        self.hide_dates = hide;
        self
    }

    pub fn hide_names(mut self, hide: bool) -> Self {
        self.hide_names = hide;
        self
    }

    /// Append custom property columns (total) or rows (time series)
    pub fn properties(mut self, include: bool) -> Self {
        self.include_properties = include;
        self
    }

    /// Split totals into debit and credit columns
    pub fn trial(mut self, trial: bool) -> Self {
        self.trial = trial;
        self
    }

    /// Show period instead of cumulative totals
    pub fn period(mut self, period: bool) -> Self {
        self.period = period;
        self
    }

    /// Skip the credit-nature sign adjustment
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Render the table
    pub fn build(&self) -> BalancesResult<Table> {
        let mut table = match self.balance_type {
            BalanceType::Total => self.total_table(),
            BalanceType::Period | BalanceType::Cumulative => self.time_table()?,
        };

        let time_layout = self.balance_type != BalanceType::Total;
        if self.hide_names {
            if time_layout {
                if !table.is_empty() {
                    table.remove(0);
                }
            } else {
                drop_first_column(&mut table);
            }
        }
        if self.hide_dates && time_layout {
            drop_first_column(&mut table);
        }
        if self.transposed {
            table = transpose(table);
        }

        tracing::debug!(
            balance_type = ?self.balance_type,
            rows = table.len(),
            "built balances table"
        );
        Ok(table)
    }

    fn amount_cell(&self, amount: Money) -> Cell {
        if self.format_values {
            Cell::Text(format_value(amount, self.settings))
        } else {
            Cell::Number(amount)
        }
    }

    fn date_cell(&self, date: NaiveDate) -> Cell {
        if self.format_dates {
            Cell::Text(format_date(date, self.settings, self.report.periodicity()))
        } else {
            Cell::Date(date)
        }
    }

    fn adjust(&self, container: &BalancesContainer, raw: Money) -> Money {
        if self.raw {
            raw
        } else {
            container.representative(raw)
        }
    }

    fn flattened(&self, roots: &[ContainerId]) -> Flattened {
        flatten(self.report, roots, self.expansion, self.include_properties)
    }

    fn total_table(&self) -> Table {
        let report = self.report;
        let mut roots = self.roots.clone();
        roots.sort_by_key(|id| report[*id].name().to_lowercase());
        let flattened = self.flattened(&roots);

        flattened
            .rows
            .iter()
            .map(|row| {
                let container = &report[row.id];
                let mut cells = vec![Cell::Text(row.display_name(report))];
                if self.trial {
                    let (debit, credit) = if self.period {
                        (container.period_debit(), container.period_credit())
                    } else {
                        (container.cumulative_debit(), container.cumulative_credit())
                    };
                    cells.push(self.amount_cell(debit));
                    cells.push(self.amount_cell(credit));
                } else {
                    let raw = if self.period {
                        container.period_balance_raw()
                    } else {
                        container.cumulative_balance_raw()
                    };
                    cells.push(self.amount_cell(self.adjust(container, raw)));
                }
                for key in &flattened.property_keys {
                    cells.push(Cell::text(
                        container.property(&[key.as_str()]).unwrap_or_default(),
                    ));
                }
                cells
            })
            .collect()
    }

    fn time_table(&self) -> BalancesResult<Table> {
        let report = self.report;
        let flattened = self.flattened(&self.roots);
        let cumulative = self.balance_type == BalanceType::Cumulative;

        // (calendar date, fuzzy date), ordered chronologically
        let mut dates: BTreeSet<(NaiveDate, u32)> = BTreeSet::new();
        let mut columns: Vec<HashMap<u32, Money>> = Vec::with_capacity(flattened.rows.len());
        for row in &flattened.rows {
            let container = &report[row.id];
            let mut values = HashMap::new();
            for point in container.balances() {
                dates.insert((point.date()?, point.fuzzy_date));
                let raw = if cumulative {
                    point.cumulative_balance
                } else {
                    point.period_balance
                };
                values.insert(point.fuzzy_date, self.adjust(container, raw));
            }
            columns.push(values);
        }

        let mut table: Table = Vec::with_capacity(dates.len() + 1);
        let mut header = vec![Cell::Empty];
        header.extend(
            flattened
                .rows
                .iter()
                .map(|row| Cell::Text(row.display_name(report))),
        );
        table.push(header);

        let mut previous: Vec<Money> = vec![Money::zero(); columns.len()];
        for (i, (date, fuzzy_date)) in dates.iter().enumerate() {
            let mut cells = vec![self.date_cell(*date)];
            for (column, values) in columns.iter().enumerate() {
                let value = match values.get(fuzzy_date) {
                    Some(value) => *value,
                    None if i > 0 && cumulative => previous[column],
                    None => Money::zero(),
                };
                previous[column] = value;
                cells.push(self.amount_cell(value));
            }
            table.push(cells);
        }

        for key in &flattened.property_keys {
            let mut cells = vec![Cell::text(key.clone())];
            cells.extend(flattened.rows.iter().map(|row| {
                Cell::text(report[row.id].property(&[key.as_str()]).unwrap_or_default())
            }));
            table.push(cells);
        }

        Ok(table)
    }
}

fn drop_first_column(table: &mut Table) {
    for row in table.iter_mut() {
        if !row.is_empty() {
            row.remove(0);
        }
    }
}

/// Swap rows and columns, padding ragged rows with empty cells
pub fn transpose(table: Table) -> Table {
    let width = table.iter().map(Vec::len).max().unwrap_or(0);
    let mut transposed: Table = (0..width).map(|_| Vec::with_capacity(table.len())).collect();
    for row in table {
        let len = row.len();
        for (column, cell) in row.into_iter().enumerate() {
            transposed[column].push(cell);
        }
        for column in transposed.iter_mut().skip(len) {
            column.push(Cell::Empty);
        }
    }
    transposed
}
