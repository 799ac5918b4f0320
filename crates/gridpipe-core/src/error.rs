//! Error types for the step contract and output sinks.

use thiserror::Error;

/// Result type for step-level operations
pub type Result<T> = std::result::Result<T, StepError>;

/// Errors that can occur while resolving a step configuration or emitting output
#[derive(Debug, Error)]
pub enum StepError {
    /// A required configuration option was not supplied
    #[error("Missing required option: {0}")]
    MissingOption(String),

    /// An option was supplied with the wrong type
    #[error("Invalid type for option {option}: expected {expected}")]
    InvalidOptionType {
        /// Option name as declared by the contract
        option: String,
        /// Human-readable expected type
        expected: &'static str,
    },

    /// The step's validation predicate rejected the configuration
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// IO error while reading configuration or writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the configuration document or a record
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
