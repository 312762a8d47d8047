//! Loading report text from files or stdin.

use std::io::Read;
use std::path::Path;

use crate::error::{BalanceError, Result};
use crate::sanitize::BYTE_ORDER_MARK;

/// Path value that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Returns true if `path` selects stdin.
#[must_use]
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Decodes report bytes, replacing invalid UTF-8 sequences.
///
/// A leading byte order mark is dropped.
#[must_use]
pub fn decode_report(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(&*text)
        .to_owned()
}

/// Reads a report from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns [`BalanceError::Io`] if the file or stdin cannot be read.
pub fn read_report(path: &Path) -> Result<String> {
    let bytes = if is_stdin(path) {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| BalanceError::io(path, e))?;
        buf
    } else {
        std::fs::read(path).map_err(|e| BalanceError::io(path, e))?
    };
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(decode_report(&bytes))
}

/// Reads an optional report; a missing path yields empty text.
///
/// # Errors
///
/// Returns [`BalanceError::Io`] if the report cannot be read.
pub fn read_optional_report(path: Option<&Path>) -> Result<String> {
    path.map_or_else(|| Ok(String::new()), read_report)
}

/// Rejects a pair of report paths that both select stdin.
///
/// # Errors
///
/// Returns [`BalanceError::StdinTwice`] when both paths are `-`.
pub fn check_stdin_once(first: Option<&Path>, second: Option<&Path>) -> Result<()> {
    if first.is_some_and(is_stdin) && second.is_some_and(is_stdin) {
        return Err(BalanceError::StdinTwice);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_stdin() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("report.txt")));
        assert!(!is_stdin(Path::new("./-")));
    }

    #[test]
    fn test_decode_report_lossy() {
        assert_eq!(decode_report(b"Alice\xFF"), "Alice\u{FFFD}");
        assert_eq!(decode_report("Bob × 2".as_bytes()), "Bob × 2");
    }

    #[test]
    fn test_decode_report_drops_byte_order_mark() {
        assert_eq!(
            decode_report(b"\xEF\xBB\xBFTransport from X : Alice"),
            "Transport from X : Alice"
        );
        assert_eq!(decode_report(b"a\xEF\xBB\xBF"), "a\u{FEFF}");
    }

    #[test]
    fn test_read_report_file_with_byte_order_mark() {
        let path = std::env::temp_dir().join(format!("crop-balance-bom-{}.txt", std::process::id()));
        std::fs::write(&path, b"\xEF\xBB\xBFTransport from X : Alice\r\n250\r\nIn 0:10:00\r\n")
            .unwrap();
        let text = read_report(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(text.starts_with("Transport from"));
        assert_eq!(crate::shipments::compute_incoming(&text)["Alice"].crop, 250);
    }

    #[test]
    fn test_read_report_file() {
        let path = std::env::temp_dir().join(format!("crop-balance-{}.txt", std::process::id()));
        std::fs::write(&path, "x\tBob's troops\nConsumption\n37\n").unwrap();
        let text = read_report(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(text.contains("Bob's troops"));
    }

    #[test]
    fn test_read_report_missing_file() {
        let path = PathBuf::from("/nonexistent/crop-balance/report.txt");
        let err = read_report(&path).unwrap_err();
        match err {
            BalanceError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("Expected Io variant, got {other:?}"),
        }
    }

    #[test]
    fn test_read_optional_report_none() {
        assert_eq!(read_optional_report(None).unwrap(), "");
    }

    #[test]
    fn test_check_stdin_once() {
        let stdin = Path::new("-");
        let file = Path::new("a.txt");
        assert!(check_stdin_once(Some(stdin), Some(file)).is_ok());
        assert!(check_stdin_once(None, Some(stdin)).is_ok());
        assert!(check_stdin_once(None, None).is_ok());
        assert!(matches!(
            check_stdin_once(Some(stdin), Some(stdin)),
            Err(BalanceError::StdinTwice)
        ));
    }
}
