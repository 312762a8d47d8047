//! Travel-time lines that close a shipment block.
//!
//! Every shipment in the marketplace overview ends with a line such as
//! `In 0:45:00` (sometimes followed by an arrival clock time). The game
//! pads minutes and seconds to two digits but not always hours, so each
//! field accepts one or two digits.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `In H:MM:SS` anywhere in a line, case-insensitively.
///
/// Word boundaries are ASCII-only, so an accented letter next to the
/// marker does not hide it.
static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?-u:\b)In\s+([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2})(?-u:\b)")
        .expect("duration pattern is a valid regex")
});

/// Returns the travel time in seconds if `line` carries an `In H:MM:SS` marker.
///
/// # Example
///
/// ```
/// use crop_balance::duration::parse_duration_seconds;
///
/// assert_eq!(parse_duration_seconds("In 0:45:00"), Some(2700));
/// assert_eq!(parse_duration_seconds("in 1:2:3 hrs."), Some(3723));
/// assert_eq!(parse_duration_seconds("Arrival at 12:00:00"), None);
/// ```
#[must_use]
pub fn parse_duration_seconds(line: &str) -> Option<u32> {
    let caps = DURATION_PATTERN.captures(line)?;
    let field = |idx: usize| -> Option<u32> { caps.get(idx)?.as_str().parse().ok() };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Formats a number of seconds as `H:MM:SS`.
///
/// Used for diagnostics only; it is not required to round-trip through
/// [`parse_duration_seconds`] for values of 100 hours and above.
#[must_use]
pub fn format_duration(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
