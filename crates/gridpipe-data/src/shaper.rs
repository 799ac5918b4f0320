//! Row shaper - turns raw worksheet rows into field-named records.

use serde_json::Value;
use tracing::warn;

use crate::record::Record;
use crate::sources::WorksheetRef;

/// How field names for shaped records are determined.
///
/// Resolved once per run at configuration-validation time; the two modes are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// Configured names: every raw row becomes one record, the Nth cell
    /// mapping to the Nth name. The caller excludes any literal header row
    /// from the configured range.
    Explicit(Vec<String>),
    /// The first row of the worksheet supplies the names for every
    /// subsequent row.
    FirstRow,
}

/// Shape one worksheet's raw rows into records.
///
/// Every produced record carries the two provenance fields identifying
/// `sheet`. Rows shorter than the field-name list yield `null` for the
/// unmatched trailing names; extra trailing cells are dropped, so every
/// record has exactly one field per name.
pub fn shape_rows(
    sheet: &WorksheetRef,
    rows: Vec<Vec<String>>,
    strategy: &HeaderStrategy,
) -> Vec<Record> {
    match strategy {
        HeaderStrategy::Explicit(names) => rows
            .into_iter()
            .map(|row| shape_row(sheet, names, row))
            .collect(),
        HeaderStrategy::FirstRow => {
            if rows.len() <= 1 {
                warn!(sheet = %sheet.title, "No data rows below header row, sheet yields no records");
                return Vec::new();
            }
            let mut iter = rows.into_iter();
            let names = iter.next().unwrap_or_default();
            iter.map(|row| shape_row(sheet, &names, row)).collect()
        }
    }
}

fn shape_row(sheet: &WorksheetRef, names: &[String], row: Vec<String>) -> Record {
    let mut record = Record::new();
    let mut cells = row.into_iter();
    for name in names {
        let value = match cells.next() {
            Some(cell) => Value::String(cell),
            None => Value::Null,
        };
        record.insert(name.clone(), value);
    }
    record.set_provenance(&sheet.title, &sheet.id);
    record
}
