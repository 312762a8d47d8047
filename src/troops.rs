//! Crop consumption per player from the troop overview.
//!
//! The rally-point overview lists one block per army. Each block starts
//! with a tab-separated header row whose last cell names the owner, either
//! `Own troops` or `<name>'s troops`, and somewhere below it carries a
//! `Consumption` label with the hourly upkeep on the following line:
//!
//! ```text
//! Hill Fort\tBob's troops
//! Troops
//! 120
//! Consumption
//! 37
//! ```
//!
//! Only that single aggregate figure is read per block. A player may own
//! several blocks (reinforcements in different villages) and their upkeep
//! is summed.

use std::collections::HashMap;

use crate::sanitize::{parse_int_loose, report_lines, trim_report};

/// Last header cell for the viewing player's own armies.
pub const OWN_TROOPS: &str = "Own troops";

/// Player name reported for [`OWN_TROOPS`] blocks.
pub const OWN_PLAYER: &str = "Own";

/// Suffix of the last header cell for another player's armies.
pub const TROOPS_SUFFIX: &str = "'s troops";

/// Label line preceding the upkeep figure of a block.
pub const CONSUMPTION_LABEL: &str = "Consumption";

/// Hourly crop consumption keyed by player name.
pub type ConsumptionByPlayer = HashMap<String, u64>;

/// Returns the trimmed text after the last tab, if the line has a tab.
fn last_cell(line: &str) -> Option<&str> {
    line.rfind('\t').map(|idx| trim_report(&line[idx + 1..]))
}

/// Returns true if `line` is a troop block header.
#[must_use]
pub fn is_troop_header(line: &str) -> bool {
    last_cell(line).is_some_and(|cell| cell == OWN_TROOPS || cell.ends_with(TROOPS_SUFFIX))
}

/// Extracts the owning player from a troop block header.
///
/// `Own troops` maps to [`OWN_PLAYER`]. Returns `None` for non-headers and
/// for headers whose name is empty after trimming.
///
/// # Example
///
/// ```
/// use crop_balance::troops::header_player;
///
/// assert_eq!(header_player("Fort\tBob's troops"), Some("Bob"));
/// assert_eq!(header_player("Fort\tOwn troops"), Some("Own"));
/// assert_eq!(header_player("Bob's troops"), None);
/// ```
#[must_use]
pub fn header_player(line: &str) -> Option<&str> {
    let cell = last_cell(line)?;
    if cell == OWN_TROOPS {
        return Some(OWN_PLAYER);
    }
    let name = trim_report(cell.strip_suffix(TROOPS_SUFFIX)?);
    (!name.is_empty()).then_some(name)
}

/// Finds the upkeep figure of the block whose header is at `lines[start - 1]`.
///
/// Scans from `start` until the next header (no figure) or a `Consumption`
/// label with a line after it.
fn block_consumption(lines: &[String], start: usize) -> u64 {
    let mut rest = lines[start..].iter().peekable();
    while let Some(line) = rest.next() {
        if is_troop_header(line) {
            return 0;
        }
        if line == CONSUMPTION_LABEL {
            if let Some(value) = rest.peek() {
                return parse_int_loose(value);
            }
        }
    }
    0
}

/// Computes hourly crop consumption per player from a troop overview.
///
/// Only players with a positive total appear in the result.
///
/// # Example
///
/// ```
/// use crop_balance::troops::compute_consumption;
///
/// let consumption = compute_consumption("x\tBob's troops\nConsumption\n37");
/// assert_eq!(consumption["Bob"], 37);
/// ```
#[must_use]
pub fn compute_consumption(text: &str) -> ConsumptionByPlayer {
    let lines = report_lines(text);
    let mut totals = ConsumptionByPlayer::new();

    for (idx, line) in lines.iter().enumerate() {
        if !is_troop_header(line) {
            continue;
        }
        let Some(player) = header_player(line) else {
            log::debug!("troop header without player name: {line:?}");
            continue;
        };

        let consumption = block_consumption(&lines, idx + 1);
        if consumption == 0 {
            log::debug!("troop block for {player} has no consumption");
            continue;
        }

        let total = totals.entry(player.to_owned()).or_default();
        *total = total.saturating_add(consumption);
    }

    log::debug!("consumption found for {} player(s)", totals.len());
    totals
}
