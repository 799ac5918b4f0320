//! Extraction runner - ties selector, shaper, and aggregation together.
//!
//! Worksheets are processed strictly sequentially in workbook enumeration
//! order, which is also the ordering guarantee for the final batch. A
//! failure while reading or shaping one worksheet is absorbed at that
//! worksheet's boundary: it is logged with the offending title, contributes
//! zero records, and never prevents later worksheets from being extracted.

use tracing::{info, warn};

use gridpipe_core::BatchSink;

use crate::error::{ExtractError, Result};
use crate::options::ExtractOptions;
use crate::record::{Record, SheetBatch};
use crate::selector::select_sheets;
use crate::shaper::shape_rows;
use crate::sources::{SheetSource, WorksheetRef};

/// Per-sheet outcome for the run summary
#[derive(Debug, Clone)]
pub struct SheetReport {
    /// Worksheet title
    pub title: String,
    /// Records extracted from this worksheet
    pub rows: usize,
    /// Failure message if the worksheet was skipped
    pub error: Option<String>,
}

/// The result of one extraction run
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Per-sheet batches of successfully shaped worksheets, in
    /// enumeration order
    pub sheets: Vec<SheetBatch>,
    /// One report per matched worksheet, failures included
    pub reports: Vec<SheetReport>,
}

impl Extraction {
    /// Total records across all sheets
    pub fn total_records(&self) -> usize {
        self.sheets.iter().map(|s| s.records.len()).sum()
    }

    /// Flatten the per-sheet batches into one ordered batch
    pub fn into_batch(self) -> Vec<Record> {
        self.sheets
            .into_iter()
            .flat_map(|sheet| sheet.records)
            .collect()
    }
}

/// Run one extraction over an opened workbook.
///
/// Fatal errors (worksheet enumeration, i.e. authorization or workbook
/// lookup) propagate; per-sheet failures are absorbed and recorded in the
/// returned reports.
pub fn extract<S: SheetSource>(source: &S, options: &ExtractOptions) -> Result<Extraction> {
    let sheets = source.worksheets()?;
    let matched = select_sheets(&sheets, &options.title_pattern);
    if matched.is_empty() {
        warn!(
            pattern = %options.title_pattern,
            "No worksheet title matched the pattern"
        );
    }

    let mut extraction = Extraction::default();
    for sheet in &matched {
        match extract_sheet(source, options, sheet) {
            Ok(records) => {
                info!(sheet = %sheet.title, rows = records.len(), "Extracted sheet");
                extraction.reports.push(SheetReport {
                    title: sheet.title.clone(),
                    rows: records.len(),
                    error: None,
                });
                extraction.sheets.push(SheetBatch {
                    title: sheet.title.clone(),
                    sheet_id: sheet.id.clone(),
                    records,
                });
            }
            Err(e) => {
                warn!(sheet = %sheet.title, error = %e, "Skipping sheet after extraction failure");
                extraction.reports.push(SheetReport {
                    title: sheet.title.clone(),
                    rows: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    if !matched.is_empty() && extraction.sheets.is_empty() {
        warn!("All matched worksheets failed to extract");
    } else if extraction.total_records() == 0 {
        warn!("No records extracted");
    }

    Ok(extraction)
}

fn extract_sheet<S: SheetSource>(
    source: &S,
    options: &ExtractOptions,
    sheet: &WorksheetRef,
) -> Result<Vec<Record>> {
    let rows = match &options.range {
        Some(range) => source.read_range(sheet, range)?,
        None => source.read_all(sheet)?,
    };
    Ok(shape_rows(sheet, rows, &options.strategy))
}

/// Run the step-framework variant: extract, then hand the whole batch to
/// the sink in a single call.
///
/// An empty batch is reported as a warning and the sink is not called; an
/// empty result is not a run failure.
pub fn run_step<S, K>(source: &S, options: &ExtractOptions, sink: &mut K) -> Result<Extraction>
where
    S: SheetSource,
    K: BatchSink<Record>,
{
    let extraction = extract(source, options)?;
    let total = extraction.total_records();
    let succeeded = extraction.sheets.len();

    if total > 0 {
        let batch = extraction.clone().into_batch();
        sink.emit(&batch).map_err(ExtractError::Step)?;
    }
    info!(records = total, sheets = succeeded, "Extraction complete");

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FIELD_SHEET_TITLE;
    use crate::shaper::HeaderStrategy;
    use crate::sources::MemorySource;
    use gridpipe_core::VecSink;
    use serde_json::json;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn options(pattern: &str, names: &[&str]) -> ExtractOptions {
        ExtractOptions {
            workbook_id: "wb".to_string(),
            title_pattern: crate::selector::compile_title_pattern(pattern).unwrap(),
            range: None,
            strategy: HeaderStrategy::Explicit(names.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn month_source() -> MemorySource {
        MemorySource::new()
            .with_sheet("Jan", "0", rows(&[&["1/1", "10"], &["1/2", "20"]]))
            .with_sheet("Feb", "1", rows(&[&["2/1", "5"]]))
            .with_sheet("Notes", "2", rows(&[&["do not extract"]]))
    }

    #[test]
    fn test_selected_sheets_aggregated_in_order() {
        let extraction = extract(
            &month_source(),
            &options("^(Jan|Feb)$", &["date", "amount"]),
        )
        .unwrap();

        let batch = extraction.into_batch();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].get(FIELD_SHEET_TITLE), Some(&json!("Jan")));
        assert_eq!(batch[1].get(FIELD_SHEET_TITLE), Some(&json!("Jan")));
        assert_eq!(batch[2].get(FIELD_SHEET_TITLE), Some(&json!("Feb")));
        assert_eq!(batch[2].get("amount"), Some(&json!("5")));
    }

    #[test]
    fn test_failing_sheet_is_isolated() {
        let source = MemorySource::new()
            .with_sheet("Jan", "0", rows(&[&["1/1", "10"], &["1/2", "20"]]))
            .with_broken_sheet("Feb", "1")
            .with_sheet("Mar", "2", rows(&[&["3/1", "7"]]));

        let extraction = extract(&source, &options(".*", &["date", "amount"])).unwrap();

        assert_eq!(extraction.sheets.len(), 2);
        assert_eq!(extraction.reports.len(), 3);
        assert!(extraction.reports[1].error.is_some());

        // Records after the failing sheet still appear, in order.
        let batch = extraction.into_batch();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[2].get(FIELD_SHEET_TITLE), Some(&json!("Mar")));
    }

    #[test]
    fn test_no_matches_yields_empty_extraction() {
        let extraction = extract(&month_source(), &options("^Q[1-4]$", &["date"])).unwrap();
        assert_eq!(extraction.total_records(), 0);
        assert!(extraction.reports.is_empty());
    }

    #[test]
    fn test_enumeration_failure_is_fatal() {
        struct FailingSource;
        impl SheetSource for FailingSource {
            fn worksheets(&self) -> Result<Vec<WorksheetRef>> {
                Err(ExtractError::Unauthorized("expired token".to_string()))
            }
            fn read_range(&self, _: &WorksheetRef, _: &str) -> Result<Vec<Vec<String>>> {
                unreachable!()
            }
            fn read_all(&self, _: &WorksheetRef) -> Result<Vec<Vec<String>>> {
                unreachable!()
            }
        }

        let err = extract(&FailingSource, &options(".*", &["date"])).unwrap_err();
        assert!(matches!(err, ExtractError::Unauthorized(_)));
    }

    #[test]
    fn test_run_step_emits_single_batch() {
        let mut sink = VecSink::new();
        let extraction = run_step(
            &month_source(),
            &options("^(Jan|Feb)$", &["date", "amount"]),
            &mut sink,
        )
        .unwrap();

        assert_eq!(extraction.total_records(), 3);
        assert_eq!(sink.batches.len(), 1);
        assert_eq!(sink.batches[0].len(), 3);
    }

    #[test]
    fn test_run_step_empty_batch_skips_sink() {
        let mut sink: VecSink<Record> = VecSink::new();
        run_step(&month_source(), &options("^Q[1-4]$", &["date"]), &mut sink).unwrap();
        assert!(sink.batches.is_empty());
    }

    #[test]
    fn test_first_row_header_through_extractor() {
        let source = MemorySource::new().with_sheet(
            "Jan",
            "0",
            rows(&[&["date", "amount"], &["1/1", "10"]]),
        );
        let opts = ExtractOptions {
            workbook_id: "wb".to_string(),
            title_pattern: crate::selector::compile_title_pattern(".*").unwrap(),
            range: None,
            strategy: HeaderStrategy::FirstRow,
        };

        let extraction = extract(&source, &opts).unwrap();
        let batch = extraction.into_batch();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].get("date"), Some(&json!("1/1")));
    }

    #[test]
    fn test_idempotent_over_unchanged_source() {
        let source = month_source();
        let opts = options("^(Jan|Feb)$", &["date", "amount"]);
        let first = extract(&source, &opts).unwrap().into_batch();
        let second = extract(&source, &opts).unwrap().into_batch();
        assert_eq!(first, second);
    }
}
