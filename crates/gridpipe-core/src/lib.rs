//! # gridpipe-core
//!
//! Core pipeline-step abstraction for gridpipe - the pieces a step needs to
//! talk to its host orchestrator without knowing anything about it:
//!
//! - **Configuration contract**: a static schema of recognized options
//!   (required/optional/default per field) validated eagerly, plus a
//!   step-supplied validation predicate that runs before the step body.
//! - **Step configuration**: the immutable key-value document supplied by
//!   the host, loaded from JSON.
//! - **Output sinks**: the boundary a step hands its finished batch to.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridpipe_core::{OptionSpec, StepConfig, StepContract};
//!
//! let contract = StepContract::new(vec![
//!     OptionSpec::required("workbookId"),
//!     OptionSpec::with_default("titleRegex", ".*".into()),
//! ])
//! .with_validator(|config| { /* reject inconsistent option combinations */ Ok(()) });
//!
//! let config = contract.resolve(StepConfig::from_path("input/config.json")?)?;
//! ```

pub mod config;
pub mod contract;
pub mod error;
pub mod sink;

// Re-exports
pub use config::StepConfig;
pub use contract::{OptionSpec, StepContract, Validator};
pub use error::{Result, StepError};
pub use sink::{BatchSink, JsonLinesSink, VecSink};
