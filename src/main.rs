use anyhow::Result;
use clap::{Parser, Subcommand};

use balances::cli::{handle_report_command, ReportCommands};
use balances::config::{BalancesPaths, BookSettings};
use balances::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "balances",
    author = "Kaylee Beyene",
    version,
    about = "Balance reports from ledger balance queries",
    long_about = "balances reads the result of a balance query, rolls account \
                  balances up into their groups and renders totals or time \
                  series as tables, CSV, JSON or YAML."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = BalancesPaths::new()?;
    let settings = BookSettings::load_or_default(&paths)?;

    match cli.command {
        Some(Commands::Report(cmd)) => {
            handle_report_command(&settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("balances configuration");
            println!("======================");
            println!("Settings file: {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Decimal separator: {:?}", settings.decimal_separator);
            println!("  Fraction digits:   {}", settings.fraction_digits);
            println!(
                "  Date pattern:      {}",
                settings.date_pattern.as_deref().unwrap_or("(periodicity default)")
            );
            println!(
                "  Time zone:         {} ({:+} min)",
                settings.time_zone, settings.time_zone_offset
            );
        }
        None => {
            println!("balances - ledger balance reports");
            println!();
            println!("Run 'balances --help' for usage information.");
        }
    }

    Ok(())
}
