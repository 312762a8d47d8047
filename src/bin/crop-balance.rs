//! Crop balance CLI
//!
//! Reads pasted shipment and troop overviews and prints the per-player
//! crop balance table.
//!
//! ## Commands
//!
//! - `balance` - Merge both reports into the ranked balance table
//! - `incoming` - Show incoming crop per player from a shipment report
//! - `consumption` - Show troop consumption per player from a troop report
//!
//! Any report path may be `-` to read from stdin. Set `RUST_LOG=debug` to
//! see which blocks were skipped and why.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crop_balance::duration::format_duration;
use crop_balance::error::Result;
use crop_balance::input::{check_stdin_once, read_optional_report, read_report};
use crop_balance::{
    compute_balance_within, compute_consumption, compute_incoming_within, IncomingEntry,
    PlayerRow, NEXT_HOUR_WINDOW_SECS,
};

/// Per-player crop balance from pasted game reports
#[derive(Parser)]
#[command(name = "crop-balance")]
#[command(about = "Per-player crop balance from pasted game reports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge shipment and troop reports into the balance table
    Balance {
        /// Marketplace shipment overview (`-` for stdin)
        #[arg(short, long)]
        shipments: Option<PathBuf>,
        /// Troop overview (`-` for stdin)
        #[arg(short, long)]
        troops: Option<PathBuf>,
        /// Count shipments arriving within this many seconds
        #[arg(short, long, default_value_t = NEXT_HOUR_WINDOW_SECS)]
        window: u32,
        /// Output format: json, pretty
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Show incoming crop per player
    Incoming {
        /// Marketplace shipment overview (`-` for stdin)
        file: PathBuf,
        /// Count shipments arriving within this many seconds
        #[arg(short, long, default_value_t = NEXT_HOUR_WINDOW_SECS)]
        window: u32,
        /// Output format: json, pretty
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Show troop consumption per player
    Consumption {
        /// Troop overview (`-` for stdin)
        file: PathBuf,
        /// Output format: json, pretty
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

// ============================================================================
// Serializable Output Structures
// ============================================================================

#[derive(Serialize)]
struct IncomingOutput {
    window: String,
    players: BTreeMap<String, IncomingEntry>,
}

#[derive(Serialize)]
struct ConsumptionOutput {
    players: BTreeMap<String, u64>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Balance {
            shipments,
            troops,
            window,
            output,
        } => cmd_balance(shipments.as_deref(), troops.as_deref(), window, output),
        Commands::Incoming {
            file,
            window,
            output,
        } => cmd_incoming(&file, window, output),
        Commands::Consumption { file, output } => cmd_consumption(&file, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Balance Command Implementation
// ============================================================================

fn cmd_balance(
    shipments: Option<&Path>,
    troops: Option<&Path>,
    window: u32,
    output: OutputFormat,
) -> Result<()> {
    check_stdin_once(shipments, troops)?;
    let shipment_text = read_optional_report(shipments)?;
    let troop_text = read_optional_report(troops)?;

    let rows = compute_balance_within(&shipment_text, &troop_text, window);
    log::info!("balance table has {} row(s)", rows.len());

    match output {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Pretty => {
            print_balance_table(&rows);
            Ok(())
        }
    }
}

fn print_balance_table(rows: &[PlayerRow]) {
    if rows.is_empty() {
        println!("No players found.");
        return;
    }

    let name_width = rows
        .iter()
        .map(|r| r.player.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    println!(
        "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>10}",
        "Player", "Incoming", "Consumption", "Net", "Deliveries"
    );
    let separator = "-".repeat(name_width + 2 + 12 + 2 + 12 + 2 + 12 + 2 + 10);
    println!("{separator}");

    // The last row is always the TOTAL row.
    if let Some((total, players)) = rows.split_last() {
        for row in players {
            print_row(row, name_width);
        }
        println!("{separator}");
        print_row(total, name_width);
    }
}

fn print_row(row: &PlayerRow, name_width: usize) {
    println!(
        "{:<name_width$}  {:>12}  {:>12}  {:>+12}  {:>10}",
        row.player, row.incoming_crop, row.consumption, row.net, row.deliveries
    );
}

// ============================================================================
// Incoming Command Implementation
// ============================================================================

fn cmd_incoming(file: &Path, window: u32, output: OutputFormat) -> Result<()> {
    let text = read_report(file)?;
    let players: BTreeMap<_, _> = compute_incoming_within(&text, window).into_iter().collect();
    let report = IncomingOutput {
        window: format_duration(window),
        players,
    };

    match output {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Pretty => {
            println!("=== Incoming crop within {} ===", report.window);
            if report.players.is_empty() {
                println!("  (none)");
            }
            for (player, entry) in &report.players {
                println!(
                    "  {player}: {} crop in {} deliver{}",
                    entry.crop,
                    entry.deliveries,
                    if entry.deliveries == 1 { "y" } else { "ies" }
                );
            }
            Ok(())
        }
    }
}

// ============================================================================
// Consumption Command Implementation
// ============================================================================

fn cmd_consumption(file: &Path, output: OutputFormat) -> Result<()> {
    let text = read_report(file)?;
    let report = ConsumptionOutput {
        players: compute_consumption(&text).into_iter().collect(),
    };

    match output {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Pretty => {
            println!("=== Troop consumption per hour ===");
            if report.players.is_empty() {
                println!("  (none)");
            }
            for (player, consumption) in &report.players {
                println!("  {player}: {consumption}");
            }
            Ok(())
        }
    }
}

// ============================================================================
// Output Helpers
// ============================================================================

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
