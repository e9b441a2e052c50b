//! CLI commands for balances reports
//!
//! Loads a balances payload, builds its report and prints tables, lookups
//! and summaries.

use crate::config::BookSettings;
use crate::display::format_table;
use crate::error::{BalancesError, BalancesResult};
use crate::export::{export_table_csv, export_table_json, export_table_yaml};
use crate::models::ContainerId;
use crate::reports::{BalanceType, BalancesReport, Cell, Expansion, Table};
use crate::services::{BalancesService, JsonFileSource};
use clap::Subcommand;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Render a balances table
    Table {
        /// Path to the balances payload (JSON)
        payload: String,

        /// Balance type: total, period or cumulative
        #[arg(short = 't', long = "type", default_value = "total")]
        balance_type: String,

        /// Format dates with the book date pattern
        #[arg(long)]
        format_dates: bool,

        /// Format values with the book decimal separator
        #[arg(long)]
        format_values: bool,

        /// Expand groups down to this depth
        #[arg(long, conflicts_with_all = ["expand_all_groups", "expand_all_accounts", "expand_single"])]
        expand: Option<usize>,

        /// Expand every group, leaving accounts out
        #[arg(long)]
        expand_all_groups: bool,

        /// Expand down to every account, leaving groups out
        #[arg(long)]
        expand_all_accounts: bool,

        /// Show the children of each group instead of the group
        #[arg(long)]
        expand_single: bool,

        /// Swap rows and columns
        #[arg(long)]
        transposed: bool,

        /// Hide the date column
        #[arg(long)]
        hide_dates: bool,

        /// Hide container names
        #[arg(long)]
        hide_names: bool,

        /// Include custom properties
        #[arg(long)]
        properties: bool,

        /// Split totals into debit and credit columns
        #[arg(long)]
        trial: bool,

        /// Use period totals instead of cumulative ones
        #[arg(long)]
        period: bool,

        /// Keep raw signs instead of credit-nature signs
        #[arg(long)]
        raw: bool,

        /// Render only this container
        #[arg(short, long)]
        group: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: table, csv, json or yaml
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Look up a container by name
    Lookup {
        /// Path to the balances payload (JSON)
        payload: String,

        /// Container name (case and accent insensitive)
        name: String,

        /// Search inside this root container instead of the roots
        #[arg(long = "in")]
        group: Option<String>,
    },

    /// Show root containers with their balances
    Summary {
        /// Path to the balances payload (JSON)
        payload: String,
    },
}

/// Table output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Handle report commands
pub fn handle_report_command(settings: &BookSettings, cmd: ReportCommands) -> BalancesResult<()> {
    match cmd {
        ReportCommands::Table {
            payload,
            balance_type,
            format_dates,
            format_values,
            expand,
            expand_all_groups,
            expand_all_accounts,
            expand_single,
            transposed,
            hide_dates,
            hide_names,
            properties,
            trial,
            period,
            raw,
            group,
            output,
            format,
        } => {
            let balance_type = BalanceType::parse(&balance_type).ok_or_else(|| {
                BalancesError::InvalidArgument(format!(
                    "Invalid balance type: '{}'. Use total, period or cumulative",
                    balance_type
                ))
            })?;
            let format = OutputFormat::parse(&format).ok_or_else(|| {
                BalancesError::InvalidArgument(format!(
                    "Invalid format: '{}'. Use table, csv, json or yaml",
                    format
                ))
            })?;
            let expansion = if expand_all_accounts {
                Expansion::AllAccounts
            } else if expand_all_groups {
                Expansion::AllGroups
            } else if expand_single {
                Expansion::Single
            } else if let Some(depth) = expand {
                Expansion::Depth(depth)
            } else {
                Expansion::Off
            };

            let report = load_report(&payload)?;
            let builder = match group {
                Some(name) => {
                    let id = resolve_container(&report, &name)?;
                    report.create_container_table(id, settings)
                }
                None => report.create_table(settings),
            };
            let table = builder
                .balance_type(balance_type)
                .format_dates(format_dates)
                .format_values(format_values)
                .expanded(expansion)
                .transposed(transposed)
                .hide_dates(hide_dates)
                .hide_names(hide_names)
                .properties(properties)
                .trial(trial)
                .period(period)
                .raw(raw)
                .build()?;

            write_table(&table, format, output)
        }
        ReportCommands::Lookup {
            payload,
            name,
            group,
        } => {
            let report = load_report(&payload)?;
            let id = match group {
                Some(group) => {
                    let group_id = report
                        .balances_container(&group)
                        .ok_or_else(|| BalancesError::unscoped_not_found(&group))?;
                    report.find_in(group_id, &name)?
                }
                None => report
                    .balances_container(&name)
                    .ok_or_else(|| BalancesError::unscoped_not_found(&name))?,
            };
            print!("{}", format_lookup(&report, id, settings)?);
            Ok(())
        }
        ReportCommands::Summary { payload } => {
            let report = load_report(&payload)?;
            println!("Periodicity: {}", report.periodicity());
            println!("{}", format_table(&summary_table(&report, settings)));
            Ok(())
        }
    }
}

fn load_report(payload: &str) -> BalancesResult<BalancesReport> {
    BalancesService::new(JsonFileSource::new(".")).report(payload)
}

/// Find a container by name among the roots, then inside each root group
fn resolve_container(report: &BalancesReport, name: &str) -> BalancesResult<ContainerId> {
    if let Some(id) = report.balances_container(name) {
        return Ok(id);
    }
    report
        .root_groups()
        .iter()
        .find_map(|group| report.find_in(*group, name).ok())
        .ok_or_else(|| BalancesError::unscoped_not_found(name))
}

fn format_lookup(
    report: &BalancesReport,
    id: ContainerId,
    settings: &BookSettings,
) -> BalancesResult<String> {
    let container = &report[id];
    let kind = if container.is_from_group() {
        "Group"
    } else {
        "Account"
    };
    let parent = container
        .parent()
        .map(|parent| report[parent].name().to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut output = String::new();
    output.push_str(&format!("{}: {}\n", kind, container.name()));
    output.push_str(&format!("  Type:       {}\n", container.account_type()));
    output.push_str(&format!("  Credit:     {}\n", container.is_credit()));
    output.push_str(&format!("  Permanent:  {}\n", container.is_permanent()));
    output.push_str(&format!("  Parent:     {}\n", parent));
    output.push_str(&format!("  Depth:      {}\n", report.depth(id)));
    output.push_str(&format!(
        "  Cumulative: {}\n",
        container.cumulative_balance_text(settings)
    ));
    output.push_str(&format!(
        "  Period:     {}\n",
        container.period_balance_text(settings)
    ));
    output.push_str(&format!(
        "  Raw:        {} / {}\n",
        container.cumulative_balance_raw_text(settings),
        container.period_balance_raw_text(settings)
    ));
    if let Some(last) = container.balances().last() {
        let at = last.date_time(settings.time_zone_offset)?;
        output.push_str(&format!("  Last bucket: {}\n", at.to_rfc3339()));
    }
    for (key, value) in container.properties() {
        output.push_str(&format!("  {}: {}\n", key, value));
    }
    Ok(output)
}

fn summary_table(report: &BalancesReport, settings: &BookSettings) -> Table {
    let mut table = vec![vec![
        Cell::text("Name"),
        Cell::text("Type"),
        Cell::text("Cumulative"),
        Cell::text("Period"),
    ]];
    for id in report.balances_containers() {
        let container = &report[id];
        table.push(vec![
            Cell::text(container.name()),
            Cell::text(container.account_type().to_string()),
            Cell::text(container.cumulative_balance_text(settings)),
            Cell::text(container.period_balance_text(settings)),
        ]);
    }
    table
}

fn write_table(table: &Table, format: OutputFormat, output: Option<PathBuf>) -> BalancesResult<()> {
    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| BalancesError::Io(format!("{}: {}", path.display(), e)))?;
            let mut writer = BufWriter::new(file);
            render(table, format, &mut writer)?;
            writer.flush()?;
            println!("Wrote {} rows to {}", table.len(), path.display());
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            render(table, format, &mut writer)
        }
    }
}

fn render<W: Write>(table: &Table, format: OutputFormat, writer: &mut W) -> BalancesResult<()> {
    match format {
        OutputFormat::Table => {
            writeln!(writer, "{}", format_table(table))?;
            Ok(())
        }
        OutputFormat::Csv => export_table_csv(table, writer),
        OutputFormat::Json => export_table_json(table, writer),
        OutputFormat::Yaml => export_table_yaml(table, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BalancePoint, BalancesPayload, ContainerPayload, Money};

    fn report() -> BalancesReport {
        let food = ContainerPayload::new("Food", false, false)
            .with_cumulative_balance(Money::new(30, 0))
            .with_property("code", "4.1")
            .with_point(BalancePoint::new(2023, 1, 0))
            .with_point(BalancePoint::new(2023, 2, 0));
        let expenses = ContainerPayload::new("Expenses", false, false)
            .with_cumulative_balance(Money::new(30, 0))
            .with_account(food);
        BalancesReport::from_payload(&BalancesPayload {
            group_balances: vec![expenses],
            ..BalancesPayload::default()
        })
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("CSV"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::parse("yml"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::parse("xml"), None);
    }

    #[test]
    fn test_resolve_container_nested() {
        let report = report();
        let food = resolve_container(&report, "food").unwrap();
        assert_eq!(report[food].name(), "Food");
        assert!(resolve_container(&report, "Rent").unwrap_err().is_not_found());
    }

    #[test]
    fn test_format_lookup() {
        let report = report();
        let food = resolve_container(&report, "Food").unwrap();
        let output = format_lookup(&report, food, &BookSettings::default()).unwrap();
        assert!(output.contains("Account: Food"));
        assert!(output.contains("Parent:     Expenses"));
        assert!(output.contains("Cumulative: -30.00"));
        assert!(output.contains("Raw:        30.00 / 0.00"));
        assert!(output.contains("code: 4.1"));
    }

    #[test]
    fn test_format_lookup_last_bucket_in_book_offset() {
        let report = report();
        let food = resolve_container(&report, "Food").unwrap();
        let settings = BookSettings {
            time_zone_offset: -180,
            ..BookSettings::default()
        };
        let output = format_lookup(&report, food, &settings).unwrap();
        assert!(output.contains("Last bucket: 2023-02-28T00:00:00-03:00"));
    }

    #[test]
    fn test_summary_table() {
        let report = report();
        let table = summary_table(&report, &BookSettings::default());
        assert_eq!(table.len(), 2);
        assert_eq!(table[1][0], Cell::text("Expenses"));
        assert_eq!(table[1][1], Cell::text("Outgoing"));
    }

    #[test]
    fn test_render_csv() {
        let table = vec![vec![Cell::text("Food"), Cell::Number(Money::new(-30, 0))]];
        let mut output = Vec::new();
        render(&table, OutputFormat::Csv, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Food,-30\n");
    }
}
