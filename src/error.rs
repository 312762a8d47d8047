//! Error types for loading and rendering reports.
//!
//! The parsers themselves never fail: malformed lines contribute nothing.
//! Errors only arise at the edges, when report text is read from disk or
//! stdin and when results are serialized.

use std::path::PathBuf;

use thiserror::Error;

/// The error type for crop balance I/O operations.
///
/// # Example
///
/// ```
/// use crop_balance::error::{BalanceError, Result};
///
/// fn example_operation() -> Result<()> {
///     Err(BalanceError::StdinTwice)
/// }
/// assert!(example_operation().is_err());
/// ```
#[derive(Error, Debug)]
pub enum BalanceError {
    /// A report file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// The path that was being read (`-` for stdin).
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Both reports were requested from stdin.
    ///
    /// Stdin can only be consumed once, so at most one report may use `-`.
    #[error("Only one report can be read from stdin")]
    StdinTwice,

    /// Results could not be serialized to JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl BalanceError {
    /// Creates an `Io` error for the given path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BalanceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for crop balance I/O operations.
pub type Result<T> = std::result::Result<T, BalanceError>;
