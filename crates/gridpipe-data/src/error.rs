//! Error types for the extraction engine.

use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting from a remote workbook
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Workbook not found at the remote source
    #[error("Workbook not found: {0}")]
    WorkbookNotFound(String),

    /// Authentication or authorization failure
    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    /// Invalid cell-range expression
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Invalid worksheet-title pattern
    #[error("Invalid title pattern: {0}")]
    InvalidPattern(String),

    /// Inconsistent or unusable extraction options
    #[error("Invalid extraction options: {0}")]
    Options(String),

    /// Any other remote-source failure
    #[error("Remote source error: {0}")]
    Source(String),

    /// Step-contract failure surfaced through the extraction engine
    #[error("Step error: {0}")]
    Step(#[from] gridpipe_core::StepError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
