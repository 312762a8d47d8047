//! Cleanup of copy-pasted report text.
//!
//! Text copied out of a rendered game page carries invisible bidirectional
//! control marks around player names and numbers. They break both line
//! matching and number parsing, so every parser runs its input through
//! [`sanitize_text`] first and then works on [`report_lines`].

/// Bidirectional control characters stripped by [`sanitize_text`].
///
/// U+200E/U+200F (LRM/RLM) and the embedding/override range U+202A..=U+202E.
pub const BIDI_CONTROLS: &[char] = &[
    '\u{200E}', '\u{200F}', '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}',
];

/// Byte order mark, left at the start of text saved by Windows editors.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Trims whitespace and byte order marks from both ends of `s`.
///
/// # Example
///
/// ```
/// use crop_balance::sanitize::trim_report;
///
/// assert_eq!(trim_report("\u{FEFF} Alice \t"), "Alice");
/// ```
#[must_use]
pub fn trim_report(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Removes bidirectional control marks and normalizes `\r\n` to `\n`.
///
/// Empty input yields empty output.
///
/// # Example
///
/// ```
/// use crop_balance::sanitize::sanitize_text;
///
/// assert_eq!(sanitize_text("\u{202D}1\u{202C}.234\r\n"), "1.234\n");
/// ```
#[must_use]
pub fn sanitize_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !BIDI_CONTROLS.contains(c))
        .collect::<String>()
        .replace("\r\n", "\n")
}

/// Sanitizes `raw` and returns its trimmed, non-blank lines in order.
#[must_use]
pub fn report_lines(raw: &str) -> Vec<String> {
    sanitize_text(raw)
        .split('\n')
        .map(trim_report)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses every ASCII digit in `line` as one base-10 number.
///
/// All other characters are dropped, so thousands separators and labels
/// are tolerated: `"1.234 crop"` parses as `1234`. Returns 0 when the line
/// has no digits. Values beyond `u64::MAX` saturate.
///
/// # Example
///
/// ```
/// use crop_balance::sanitize::parse_int_loose;
///
/// assert_eq!(parse_int_loose("Crop: 12,500"), 12500);
/// assert_eq!(parse_int_loose("Consumption"), 0);
/// ```
#[must_use]
pub fn parse_int_loose(line: &str) -> u64 {
    line.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}
