//! Incoming crop per player from the marketplace shipment overview.
//!
//! A shipment block in the pasted overview looks like this:
//!
//! ```text
//! Transport from Hill Fort : Alice
//! Resources
//! 1 ×
//! 500
//! 400
//! 300
//! 250
//! In 0:45:00 hrs.
//! ```
//!
//! The block opens on the `Transport from <source> : <destination>` line and
//! closes on the `In H:MM:SS` travel-time line. Resource amounts appear in
//! a fixed order with crop last, so the crop of a block is the last number
//! collected before the travel-time line. A block is credited to its
//! destination player only when it arrives within the window (one hour by
//! default) and carries crop.
//!
//! # Example
//!
//! ```
//! use crop_balance::shipments::compute_incoming;
//!
//! let text = "Transport from Village : Alice\n100\n250\nIn 0:45:00";
//! let incoming = compute_incoming(text);
//! assert_eq!(incoming["Alice"].crop, 250);
//! assert_eq!(incoming["Alice"].deliveries, 1);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::duration::{format_duration, parse_duration_seconds};
use crate::sanitize::{parse_int_loose, report_lines, trim_report};

/// Default arrival window: shipments landing within the next hour.
pub const NEXT_HOUR_WINDOW_SECS: u32 = 3600;

/// The multiplication sign used by quantity artifacts such as `1 ×`.
pub const MULTIPLIER_SIGN: char = '×';

/// Matches `Transport from <source> : <destination>` at the start of a line.
static TRANSPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Transport from\s+(.+?)\s*:\s*(.+)$")
        .expect("transport pattern is a valid regex")
});

/// Crop arriving for one player, accumulated over every credited block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncomingEntry {
    /// Total crop across credited blocks.
    pub crop: u64,
    /// Number of credited blocks.
    pub deliveries: u64,
}

/// Incoming crop keyed by destination player name.
pub type IncomingByPlayer = HashMap<String, IncomingEntry>;

/// Scanner state while walking the overview lines.
#[derive(Debug)]
enum BlockState {
    /// No shipment block is open.
    Idle,
    /// A block addressed to `player` is open.
    InBlock { player: String, numbers: Vec<u64> },
}

/// Returns the destination player if `line` opens a shipment block.
#[must_use]
pub fn transport_destination(line: &str) -> Option<&str> {
    let caps = TRANSPORT_PATTERN.captures(line)?;
    Some(trim_report(caps.get(2)?.as_str()))
}

/// Computes incoming crop per player for shipments arriving within the next hour.
#[must_use]
pub fn compute_incoming(text: &str) -> IncomingByPlayer {
    compute_incoming_within(text, NEXT_HOUR_WINDOW_SECS)
}

/// Computes incoming crop per player for shipments arriving within `window_secs`.
///
/// The window is inclusive: a block travelling exactly `window_secs` counts.
/// Only players with at least one credited block appear in the result.
#[must_use]
pub fn compute_incoming_within(text: &str, window_secs: u32) -> IncomingByPlayer {
    let mut totals = IncomingByPlayer::new();
    let mut state = BlockState::Idle;

    for line in report_lines(text) {
        if let Some(player) = transport_destination(&line) {
            if let BlockState::InBlock { player: open, .. } = &state {
                log::debug!("shipment to {open} has no travel time, abandoning block");
            }
            state = BlockState::InBlock {
                player: player.to_owned(),
                numbers: Vec::new(),
            };
            continue;
        }

        let BlockState::InBlock { player, numbers } = &mut state else {
            continue;
        };

        if let Some(duration) = parse_duration_seconds(&line) {
            let crop = numbers.last().copied().unwrap_or(0);
            credit_block(&mut totals, player, crop, duration, window_secs);
            state = BlockState::Idle;
            continue;
        }

        let value = parse_int_loose(&line);
        if value != 0 && !is_multiplier_artifact(&line, value) {
            numbers.push(value);
        }
    }

    if let BlockState::InBlock { player, .. } = &state {
        log::debug!("shipment to {player} has no travel time, dropping block");
    }
    log::debug!("incoming crop found for {} player(s)", totals.len());
    totals
}

/// True for the `1 ×` quantity line that precedes resource amounts.
fn is_multiplier_artifact(line: &str, value: u64) -> bool {
    value == 1 && line.contains(MULTIPLIER_SIGN)
}

/// Adds a closed block to `totals` if it qualifies.
fn credit_block(
    totals: &mut IncomingByPlayer,
    player: &str,
    crop: u64,
    duration: u32,
    window_secs: u32,
) {
    if player.is_empty() {
        log::debug!("shipment block without destination, skipping");
        return;
    }
    if duration > window_secs {
        log::debug!(
            "shipment to {player} arrives in {}, outside window of {}",
            format_duration(duration),
            format_duration(window_secs)
        );
        return;
    }
    if crop == 0 {
        log::debug!("shipment to {player} carries no crop, skipping");
        return;
    }

    let entry = totals.entry(player.to_owned()).or_default();
    entry.crop = entry.crop.saturating_add(crop);
    entry.deliveries = entry.deliveries.saturating_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(destination: &str, body: &[&str], duration: &str) -> String {
        let mut lines = vec![format!("Transport from Village : {destination}")];
        lines.extend(body.iter().map(|s| (*s).to_string()));
        lines.push(duration.to_string());
        lines.join("\n")
    }

    // ========================
    // transport_destination tests
    // ========================

    #[test]
    fn test_transport_destination_basic() {
        assert_eq!(
            transport_destination("Transport from Village : Alice"),
            Some("Alice")
        );
    }

    #[test]
    fn test_transport_destination_no_space_before_colon() {
        assert_eq!(
            transport_destination("Transport from Hill Fort: Bob the Builder"),
            Some("Bob the Builder")
        );
    }

    #[test]
    fn test_transport_destination_case_insensitive() {
        assert_eq!(
            transport_destination("TRANSPORT FROM 01 : Carol"),
            Some("Carol")
        );
    }

    #[test]
    fn test_transport_destination_splits_on_first_colon() {
        assert_eq!(
            transport_destination("Transport from A : B : C"),
            Some("B : C")
        );
    }

    #[test]
    fn test_transport_destination_rejects_other_lines() {
        assert_eq!(transport_destination("Transport from Village"), None);
        assert_eq!(transport_destination("Own transport from X : Y"), None);
        assert_eq!(transport_destination("Transport from : Alice"), None);
        assert_eq!(transport_destination("250"), None);
    }

    // ========================
    // compute_incoming tests
    // ========================

    #[test]
    fn test_incoming_last_number_is_crop() {
        let text = block("Alice", &["100", "250"], "In 0:45:00");
        let incoming = compute_incoming(&text);
        assert_eq!(
            incoming.get("Alice"),
            Some(&IncomingEntry {
                crop: 250,
                deliveries: 1
            })
        );
    }

    #[test]
    fn test_incoming_outside_window_discarded() {
        let text = block("Alice", &["100", "250"], "In 2:00:00");
        assert!(compute_incoming(&text).is_empty());
    }

    #[test]
    fn test_incoming_window_is_inclusive() {
        let text = block("Alice", &["250"], "In 1:00:00");
        assert_eq!(compute_incoming(&text)["Alice"].crop, 250);

        let text = block("Alice", &["250"], "In 1:00:01");
        assert!(compute_incoming(&text).is_empty());
    }

    #[test]
    fn test_incoming_custom_window() {
        let text = block("Alice", &["250"], "In 2:00:00");
        assert_eq!(compute_incoming_within(&text, 7200)["Alice"].crop, 250);
        assert!(compute_incoming_within(&text, 60).is_empty());
    }

    #[test]
    fn test_incoming_no_numbers_discarded() {
        let text = block("Alice", &["Resources"], "In 0:10:00");
        assert!(compute_incoming(&text).is_empty());
    }

    #[test]
    fn test_incoming_zero_lines_are_skipped() {
        // "0" parses to zero and is not collected, so 250 stays the last number.
        let text = block("Alice", &["250", "0"], "In 0:10:00");
        assert_eq!(compute_incoming(&text)["Alice"].crop, 250);
    }

    #[test]
    fn test_incoming_multiplier_artifact_ignored() {
        let text = block("Alice", &["300", "1 ×"], "In 0:10:00");
        assert_eq!(compute_incoming(&text)["Alice"].crop, 300);
    }

    #[test]
    fn test_incoming_plain_one_is_collected() {
        let text = block("Alice", &["300", "1"], "In 0:10:00");
        assert_eq!(compute_incoming(&text)["Alice"].crop, 1);
    }

    #[test]
    fn test_incoming_multiplier_sign_with_other_value_collected() {
        let text = block("Alice", &["300", "2 ×"], "In 0:10:00");
        assert_eq!(compute_incoming(&text)["Alice"].crop, 2);
    }

    #[test]
    fn test_incoming_accumulates_per_player() {
        let text = [
            block("Alice", &["100"], "In 0:10:00"),
            block("Bob", &["40"], "In 0:20:00"),
            block("Alice", &["1.500"], "In 0:59:59"),
        ]
        .join("\n");
        let incoming = compute_incoming(&text);
        assert_eq!(incoming.len(), 2);
        assert_eq!(
            incoming["Alice"],
            IncomingEntry {
                crop: 1600,
                deliveries: 2
            }
        );
        assert_eq!(
            incoming["Bob"],
            IncomingEntry {
                crop: 40,
                deliveries: 1
            }
        );
    }

    #[test]
    fn test_incoming_new_transport_abandons_open_block() {
        let text = "Transport from X : Alice\n500\nTransport from Y : Bob\n70\nIn 0:05:00";
        let incoming = compute_incoming(text);
        assert!(!incoming.contains_key("Alice"));
        assert_eq!(incoming["Bob"].crop, 70);
    }

    #[test]
    fn test_incoming_new_transport_resets_numbers() {
        let text = "Transport from X : Alice\n500\nTransport from Y : Alice\nIn 0:05:00";
        assert!(compute_incoming(text).is_empty());
    }

    #[test]
    fn test_incoming_unterminated_block_dropped() {
        let text = "Transport from X : Alice\n500\n600";
        assert!(compute_incoming(text).is_empty());
    }

    #[test]
    fn test_incoming_lines_outside_block_ignored() {
        let text = "999\nIn 0:01:00\nTransport from X : Alice\n10\nIn 0:01:00\n888\nIn 0:01:00";
        let incoming = compute_incoming(text);
        assert_eq!(incoming.len(), 1);
        assert_eq!(
            incoming["Alice"],
            IncomingEntry {
                crop: 10,
                deliveries: 1
            }
        );
    }

    #[test]
    fn test_incoming_bidi_marks_and_crlf() {
        let text = "Transport from X : \u{202D}Alice\u{202C}\r\n\u{202D}1\u{202C},\u{202D}200\u{202C}\r\nIn 0:30:00\r\n";
        assert_eq!(compute_incoming(text)["Alice"].crop, 1200);
    }

    #[test]
    fn test_incoming_leading_byte_order_mark() {
        let text = "\u{FEFF}Transport from Village : Alice\n100\n250\nIn 0:45:00";
        assert_eq!(
            compute_incoming(text).get("Alice"),
            Some(&IncomingEntry {
                crop: 250,
                deliveries: 1
            })
        );
    }

    #[test]
    fn test_incoming_duration_followed_by_accented_letter() {
        let text = block("Alice", &["100", "250"], "In 0:45:00é");
        assert_eq!(compute_incoming(&text)["Alice"].crop, 250);
    }

    #[test]
    fn test_incoming_destination_trimmed() {
        let text = "Transport from X :    Alice   \n10\nIn 0:01:00";
        assert!(compute_incoming(text).contains_key("Alice"));
    }

    #[test]
    fn test_incoming_names_case_sensitive() {
        let text = [
            block("alice", &["10"], "In 0:01:00"),
            block("Alice", &["20"], "In 0:01:00"),
        ]
        .join("\n");
        let incoming = compute_incoming(&text);
        assert_eq!(incoming["alice"].crop, 10);
        assert_eq!(incoming["Alice"].crop, 20);
    }

    #[test]
    fn test_incoming_empty_input() {
        assert!(compute_incoming("").is_empty());
        assert!(compute_incoming("   \n\t\n").is_empty());
    }

    #[test]
    fn test_incoming_idempotent() {
        let text = block("Alice", &["100", "250"], "In 0:45:00");
        assert_eq!(compute_incoming(&text), compute_incoming(&text));
    }
}
