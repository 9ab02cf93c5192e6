//! Error types for the graph tooling surface.
//!
//! The builder core never fails; a smaller-than-requested graph is its only
//! shortfall signal. Errors exist only at the I/O boundary (loading raw
//! edges, writing exports) and in CLI argument parsing.

use thiserror::Error;

/// Errors raised by the export and CLI layer.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw edge input or export serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unrecognized graph mode on the command line.
    #[error("Unknown graph mode: {0} (expected 'ego' or 'sample')")]
    UnknownMode(String),
}
