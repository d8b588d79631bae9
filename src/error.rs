//! Error types for peakfifo
//!
//! Only the std-side collaborators can fail. Unpacking, windowing and
//! selection are total, and oversized batches are clamped rather than
//! rejected.

use thiserror::Error;

/// Result type alias for peakfifo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for peakfifo operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The sample source could not be opened at all
    #[error("Sample source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    /// A read failed part way through the run
    #[error("Read error: {0}")]
    Read(String),

    /// The report could not be written
    #[error("Render error: {path}: {reason}")]
    Render { path: String, reason: String },
}
