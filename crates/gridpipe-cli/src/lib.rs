//! gridpipe CLI - standalone runner library
//!
//! This library backs the `gridpipe` binary: it loads the step
//! configuration, runs the extraction against Google Sheets, and writes the
//! compatibility outputs (per-sheet `.pipe` files and the termination log).
//!
//! # Binary Usage
//!
//! ```bash
//! # Extract using input/config.json into output/
//! GRIDPIPE_ACCESS_TOKEN=... gridpipe
//!
//! # Override the paths
//! gridpipe --config step.json --output /tmp/pipes --termination-log /tmp/status
//! ```

pub mod app;
pub mod pipes;

// Re-export main entry point
pub use app::run_cli;
pub use pipes::{pipe_filename, write_sheet_pipes, write_termination_log};
pub use pipes::{OUTPUT_PIPES_PREFIX, PIPE_EXTENSION, SUCCESS_MARKER};
