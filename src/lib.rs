//! # Crop Balance
//!
//! Per-player crop balance from two blocks of text copy-pasted out of the
//! game's web pages:
//!
//! - the **marketplace overview**, listing incoming merchant shipments
//! - the **troop overview**, listing armies and their hourly crop upkeep
//!
//! For every player the crate reports the crop arriving within the next
//! hour, the crop their troops eat per hour, and the difference.
//!
//! ## Quick Start
//!
//! ```
//! use crop_balance::compute_balance;
//!
//! let shipments = "Transport from Village : Alice\n100\n250\nIn 0:45:00";
//! let troops = "Fort\tAlice's troops\nConsumption\n100\nFort\tBob's troops\nConsumption\n37";
//!
//! let rows = compute_balance(shipments, troops);
//! for row in &rows {
//!     println!("{}: {:+}", row.player, row.net);
//! }
//! assert_eq!(rows.len(), 3); // Alice, Bob, TOTAL
//! ```
//!
//! ## Module Overview
//!
//! - [`sanitize`] - Invisible-mark stripping, line splitting and loose number parsing
//! - [`duration`] - `In H:MM:SS` travel-time extraction
//! - [`shipments`] - Incoming crop per player from shipment blocks
//! - [`troops`] - Troop upkeep per player from troop header blocks
//! - [`balance`] - Merging both into ranked rows with a TOTAL row
//! - [`input`] - Reading report text from files or stdin
//! - [`error`] - Error types for the I/O edge
//!
//! Parsing never fails. Lines that do not fit the expected layout are
//! skipped and incomplete blocks contribute nothing. Every call starts
//! from scratch, so the functions can be re-run on each edit of the input.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod balance;
pub mod duration;
pub mod error;
pub mod input;
pub mod sanitize;
pub mod shipments;
pub mod troops;

// Re-export commonly used types at the crate root
pub use balance::{build_rows, name_collator, PlayerRow, TOTAL_LABEL};
pub use error::{BalanceError, Result};
pub use shipments::{
    compute_incoming, compute_incoming_within, IncomingByPlayer, IncomingEntry,
    NEXT_HOUR_WINDOW_SECS,
};
pub use troops::{compute_consumption, ConsumptionByPlayer};

/// Parses both reports and returns the ranked balance table.
///
/// Uses the default one-hour shipment window.
#[must_use]
pub fn compute_balance(shipment_text: &str, troop_text: &str) -> Vec<PlayerRow> {
    compute_balance_within(shipment_text, troop_text, NEXT_HOUR_WINDOW_SECS)
}

/// Parses both reports with a custom shipment window in seconds.
#[must_use]
pub fn compute_balance_within(
    shipment_text: &str,
    troop_text: &str,
    window_secs: u32,
) -> Vec<PlayerRow> {
    let incoming = compute_incoming_within(shipment_text, window_secs);
    let consumption = compute_consumption(troop_text);
    build_rows(&incoming, &consumption)
}
