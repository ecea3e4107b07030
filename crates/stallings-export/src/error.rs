//! Export error types.

use thiserror::Error;

/// Errors produced by export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing to the output sink failed.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
