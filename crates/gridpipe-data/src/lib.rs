//! # gridpipe-data
//!
//! Spreadsheet extraction engine for gridpipe - read a remote workbook,
//! filter its worksheets by title pattern, shape rows into field-named
//! records with provenance metadata, and aggregate them into an ordered
//! batch.
//!
//! ## Features
//!
//! - **Remote source boundary**: the [`SheetSource`] trait, with a Google
//!   Sheets v4 adapter ([`SheetsClient`]) and an in-memory source for tests
//! - **Sheet selection**: full-match title patterns, defaulting to
//!   match-everything
//! - **Row shaping**: explicit column names or first-row-as-header,
//!   resolved once per run
//! - **Fault isolation**: one bad worksheet never aborts extraction of the
//!   others
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridpipe_core::JsonLinesSink;
//! use gridpipe_data::{run_step, ExtractOptions, SheetsAuth, SheetsClient};
//!
//! let config = ExtractOptions::contract().resolve(config)?;
//! let options = ExtractOptions::from_config(&config)?;
//!
//! let source = SheetsClient::open(&options.workbook_id, SheetsAuth::Bearer(token))?;
//! let mut sink = JsonLinesSink::new(std::io::stdout());
//! run_step(&source, &options, &mut sink)?;
//! ```

pub mod error;
pub mod extractor;
pub mod options;
pub mod record;
pub mod selector;
pub mod shaper;
pub mod sources;

// Re-exports
pub use error::{ExtractError, Result};
pub use extractor::{extract, run_step, Extraction, SheetReport};
pub use options::ExtractOptions;
pub use record::{Record, SheetBatch, FIELD_SHEET_ID, FIELD_SHEET_TITLE};
pub use selector::{compile_title_pattern, select_sheets, MATCH_ALL_PATTERN};
pub use shaper::{shape_rows, HeaderStrategy};
pub use sources::{MemorySource, SheetSource, SheetsAuth, SheetsClient, WorksheetRef};
