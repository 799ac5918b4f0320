//! In-memory sheet source, for tests and in-process embedding.

use crate::error::{ExtractError, Result};
use crate::sources::{SheetSource, WorksheetRef};

struct MemorySheet {
    meta: WorksheetRef,
    rows: Vec<Vec<String>>,
    broken: bool,
}

/// Sheet source backed by in-memory rows.
///
/// Range expressions are not interpreted; a bounded-range read returns the
/// stored rows as-is. Range semantics belong to the remote service, so tests
/// exercising the engine store exactly the rows the range would select.
#[derive(Default)]
pub struct MemorySource {
    sheets: Vec<MemorySheet>,
}

impl MemorySource {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a worksheet with the given rows
    pub fn with_sheet(
        mut self,
        title: impl Into<String>,
        id: impl Into<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        self.sheets.push(MemorySheet {
            meta: WorksheetRef::new(title, id),
            rows,
            broken: false,
        });
        self
    }

    /// Append a worksheet whose reads always fail
    pub fn with_broken_sheet(mut self, title: impl Into<String>, id: impl Into<String>) -> Self {
        self.sheets.push(MemorySheet {
            meta: WorksheetRef::new(title, id),
            rows: Vec::new(),
            broken: true,
        });
        self
    }

    fn rows_for(&self, sheet: &WorksheetRef) -> Result<Vec<Vec<String>>> {
        let stored = self
            .sheets
            .iter()
            .find(|s| s.meta == *sheet)
            .ok_or_else(|| ExtractError::Source(format!("No such worksheet: {}", sheet.title)))?;
        if stored.broken {
            return Err(ExtractError::Source(format!(
                "Simulated read failure: {}",
                sheet.title
            )));
        }
        Ok(stored.rows.clone())
    }
}

impl SheetSource for MemorySource {
    fn worksheets(&self) -> Result<Vec<WorksheetRef>> {
        Ok(self.sheets.iter().map(|s| s.meta.clone()).collect())
    }

    fn read_range(&self, sheet: &WorksheetRef, _range: &str) -> Result<Vec<Vec<String>>> {
        self.rows_for(sheet)
    }

    fn read_all(&self, sheet: &WorksheetRef) -> Result<Vec<Vec<String>>> {
        self.rows_for(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_enumeration_order() {
        let source = MemorySource::new()
            .with_sheet("Jan", "0", Vec::new())
            .with_sheet("Feb", "1", Vec::new());
        let sheets = source.worksheets().unwrap();
        assert_eq!(sheets[0].title, "Jan");
        assert_eq!(sheets[1].title, "Feb");
    }

    #[test]
    fn test_read_rows() {
        let source = MemorySource::new().with_sheet("Jan", "0", rows(&[&["1/1", "10"]]));
        let sheet = WorksheetRef::new("Jan", "0");
        assert_eq!(source.read_all(&sheet).unwrap(), rows(&[&["1/1", "10"]]));
        assert_eq!(
            source.read_range(&sheet, "A1:B1").unwrap(),
            rows(&[&["1/1", "10"]])
        );
    }

    #[test]
    fn test_broken_sheet_fails() {
        let source = MemorySource::new().with_broken_sheet("Feb", "1");
        let sheet = WorksheetRef::new("Feb", "1");
        assert!(source.read_all(&sheet).is_err());
    }
}
