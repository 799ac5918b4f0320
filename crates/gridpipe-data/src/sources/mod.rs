//! Remote source adapters.
//!
//! A [`SheetSource`] is a pure I/O boundary over one opened workbook: it
//! enumerates worksheets and retrieves raw string cells, nothing more. The
//! production implementation is [`SheetsClient`] over the Google Sheets v4
//! REST API; [`MemorySource`] backs tests and in-process embedding.

pub mod google;
pub mod memory;

pub use google::{SheetsAuth, SheetsClient, SPREADSHEETS_SCOPE};
pub use memory::MemorySource;

use crate::error::Result;

/// A worksheet handle: title for matching, opaque id for provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetRef {
    /// Worksheet title as shown in the workbook
    pub title: String,
    /// Opaque worksheet identifier
    pub id: String,
}

impl WorksheetRef {
    /// Create a worksheet handle
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
        }
    }
}

/// Trait for sources that expose one workbook's worksheets as raw cells
pub trait SheetSource {
    /// Enumerate worksheets in workbook order
    fn worksheets(&self) -> Result<Vec<WorksheetRef>>;

    /// Read a bounded rectangular range from one worksheet
    ///
    /// The range expression uses the source's native notation (A1 notation
    /// for the Sheets adapter); its interpretation belongs to the source.
    fn read_range(&self, sheet: &WorksheetRef, range: &str) -> Result<Vec<Vec<String>>>;

    /// Read the full contents of one worksheet, every row and column
    fn read_all(&self, sheet: &WorksheetRef) -> Result<Vec<Vec<String>>>;
}
