//! Shaped output records and per-sheet batches.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provenance field: title of the worksheet a record came from
pub const FIELD_SHEET_TITLE: &str = "_sheet_title";
/// Provenance field: identifier of the worksheet a record came from
pub const FIELD_SHEET_ID: &str = "_sheet_id";

/// One shaped output row: named fields plus provenance metadata.
///
/// Field order is preserved, so emitted JSON keeps the declared column
/// order followed by the two provenance fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. A repeated name overwrites the earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Number of fields, provenance included
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Append the two provenance fields identifying the source worksheet
    pub fn set_provenance(&mut self, sheet_title: &str, sheet_id: &str) {
        self.fields.insert(
            FIELD_SHEET_TITLE.to_string(),
            Value::String(sheet_title.to_string()),
        );
        self.fields.insert(
            FIELD_SHEET_ID.to_string(),
            Value::String(sheet_id.to_string()),
        );
    }
}

/// All records shaped from one worksheet, in input row order
#[derive(Debug, Clone, PartialEq)]
pub struct SheetBatch {
    /// Worksheet title
    pub title: String,
    /// Opaque worksheet identifier
    pub sheet_id: String,
    /// Shaped records, one per qualifying input row
    pub records: Vec<Record>,
}
