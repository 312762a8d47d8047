//! Merging incoming crop and consumption into ranked per-player rows.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use feruca::{Collator, Locale, Tailoring};
use serde::Serialize;

use crate::shipments::{IncomingByPlayer, IncomingEntry};
use crate::troops::ConsumptionByPlayer;

/// Player label of the synthetic summary row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// One line of the balance table.
///
/// Serializes with the field names the table view binds to
/// (`player`, `incomingCrop`, `consumption`, `net`, `deliveries`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRow {
    /// Player name, or [`TOTAL_LABEL`] for the summary row.
    pub player: String,
    /// Crop arriving within the shipment window.
    pub incoming_crop: u64,
    /// Hourly troop consumption.
    pub consumption: u64,
    /// `incoming_crop - consumption`.
    pub net: i64,
    /// Number of credited shipments.
    pub deliveries: u64,
}

impl PlayerRow {
    /// Builds a row, deriving `net` from the other fields.
    #[must_use]
    pub fn new(player: impl Into<String>, incoming: IncomingEntry, consumption: u64) -> Self {
        Self {
            player: player.into(),
            incoming_crop: incoming.crop,
            consumption,
            net: net_balance(incoming.crop, consumption),
            deliveries: incoming.deliveries,
        }
    }
}

/// `incoming - consumption`, saturating at the `i64` bounds.
#[must_use]
pub fn net_balance(incoming: u64, consumption: u64) -> i64 {
    let incoming = i64::try_from(incoming).unwrap_or(i64::MAX);
    let consumption = i64::try_from(consumption).unwrap_or(i64::MAX);
    incoming.saturating_sub(consumption)
}

/// Collator ordering player names the way the table view does.
///
/// CLDR root collation at tertiary strength with punctuation and spaces
/// kept significant, so `bob` sorts before `Carol` and `alice` before
/// `Alice`.
#[must_use]
pub fn name_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Highest net first, then player name ascending.
fn rank(collator: &mut Collator, a: &PlayerRow, b: &PlayerRow) -> Ordering {
    b.net
        .cmp(&a.net)
        .then_with(|| collator.collate(a.player.as_str(), b.player.as_str()))
}

/// Sums every field of `rows` into a [`TOTAL_LABEL`] row.
fn total_row(rows: &[PlayerRow]) -> PlayerRow {
    let incoming = rows.iter().fold(IncomingEntry::default(), |acc, row| IncomingEntry {
        crop: acc.crop.saturating_add(row.incoming_crop),
        deliveries: acc.deliveries.saturating_add(row.deliveries),
    });
    let consumption = rows
        .iter()
        .fold(0u64, |acc, row| acc.saturating_add(row.consumption));
    PlayerRow::new(TOTAL_LABEL, incoming, consumption)
}

/// Joins both maps on player name and ranks the result.
///
/// Every player present in either map gets one row. Rows are sorted by
/// net descending, ties broken by [`name_collator`] order. When at least one row
/// exists a [`TOTAL_LABEL`] row summing all of them is appended last.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use crop_balance::balance::build_rows;
/// use crop_balance::shipments::IncomingEntry;
///
/// let incoming = HashMap::from([(
///     "Alice".to_string(),
///     IncomingEntry { crop: 250, deliveries: 1 },
/// )]);
/// let consumption = HashMap::from([("Alice".to_string(), 100), ("Bob".to_string(), 37)]);
///
/// let rows = build_rows(&incoming, &consumption);
/// let order: Vec<_> = rows.iter().map(|r| r.player.as_str()).collect();
/// assert_eq!(order, ["Alice", "Bob", "TOTAL"]);
/// assert_eq!(rows[2].net, 113);
/// ```
#[must_use]
pub fn build_rows(
    incoming: &IncomingByPlayer,
    consumption: &ConsumptionByPlayer,
) -> Vec<PlayerRow> {
    let players: BTreeSet<&str> = incoming
        .keys()
        .chain(consumption.keys())
        .map(String::as_str)
        .collect();

    let mut rows: Vec<PlayerRow> = players
        .into_iter()
        .map(|player| {
            let inc = incoming.get(player).copied().unwrap_or_default();
            let cons = consumption.get(player).copied().unwrap_or(0);
            PlayerRow::new(player, inc, cons)
        })
        .collect();

    let mut collator = name_collator();
    rows.sort_by(|a, b| rank(&mut collator, a, b));

    if !rows.is_empty() {
        let total = total_row(&rows);
        rows.push(total);
    }
    rows
}
