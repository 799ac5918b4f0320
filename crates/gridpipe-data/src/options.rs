//! Extraction options - the step's declared configuration surface.
//!
//! [`ExtractOptions`] is the fully resolved, immutable form of the step
//! configuration: the header strategy and title pattern are decided here,
//! once per run, not re-decided per worksheet.

use regex::Regex;
use serde_json::Value;

use gridpipe_core::{OptionSpec, StepConfig, StepContract};

use crate::error::{ExtractError, Result};
use crate::record::{FIELD_SHEET_ID, FIELD_SHEET_TITLE};
use crate::selector::{compile_title_pattern, MATCH_ALL_PATTERN};
use crate::shaper::HeaderStrategy;

/// Option: workbook identifier (required)
pub const OPT_WORKBOOK_ID: &str = "workbookId";
/// Option: full-match worksheet-title pattern (optional, default `.*`)
pub const OPT_TITLE_REGEX: &str = "titleRegex";
/// Option: bounded cell-range expression, e.g. `A2:C` (optional)
pub const OPT_COLUMNS: &str = "columns";
/// Option: explicit output field names (optional)
pub const OPT_COLUMN_NAMES: &str = "columnNames";

/// Fully resolved extraction options, fixed for one run
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Identifier of the workbook to open
    pub workbook_id: String,
    /// Compiled full-match title pattern
    pub title_pattern: Regex,
    /// Bounded range to read per sheet; `None` reads the full sheet
    pub range: Option<String>,
    /// Header strategy, resolved once
    pub strategy: HeaderStrategy,
}

impl ExtractOptions {
    /// The configuration contract this step declares to its host
    pub fn contract() -> StepContract {
        StepContract::new(vec![
            OptionSpec::required(OPT_WORKBOOK_ID),
            OptionSpec::with_default(OPT_TITLE_REGEX, Value::String(MATCH_ALL_PATTERN.to_string())),
            OptionSpec::optional(OPT_COLUMNS),
            OptionSpec::optional(OPT_COLUMN_NAMES),
        ])
        .with_validator(|config| {
            ExtractOptions::from_config(config)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
    }

    /// Resolve options from a contract-resolved configuration.
    ///
    /// Rejects the inconsistent combinations up front:
    /// - a bounded range (`columns`) without explicit `columnNames` - the
    ///   range only makes sense in explicit-names mode,
    /// - duplicate entries in `columnNames`,
    /// - a `columnNames` entry colliding with a provenance field name.
    pub fn from_config(config: &StepConfig) -> Result<Self> {
        let workbook_id = config
            .get_str(OPT_WORKBOOK_ID)?
            .ok_or_else(|| ExtractError::Options(format!("{OPT_WORKBOOK_ID} is required")))?
            .to_string();

        let pattern = config.get_str(OPT_TITLE_REGEX)?.unwrap_or(MATCH_ALL_PATTERN);
        let title_pattern = compile_title_pattern(pattern)?;

        let range = config.get_str(OPT_COLUMNS)?.map(str::to_string);
        let column_names = config.get_str_list(OPT_COLUMN_NAMES)?;

        let strategy = match column_names {
            Some(names) => {
                validate_column_names(&names)?;
                HeaderStrategy::Explicit(names)
            }
            None => {
                if range.is_some() {
                    return Err(ExtractError::Options(format!(
                        "{OPT_COLUMNS} requires {OPT_COLUMN_NAMES}; a bounded range cannot \
                         be combined with first-row-as-header mode"
                    )));
                }
                HeaderStrategy::FirstRow
            }
        };

        Ok(Self {
            workbook_id,
            title_pattern,
            range,
            strategy,
        })
    }
}

fn validate_column_names(names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(ExtractError::Options(format!(
            "{OPT_COLUMN_NAMES} must not be empty when supplied"
        )));
    }
    for (i, name) in names.iter().enumerate() {
        if name == FIELD_SHEET_TITLE || name == FIELD_SHEET_ID {
            return Err(ExtractError::Options(format!(
                "Column name {name:?} collides with a provenance field"
            )));
        }
        if names[..i].contains(name) {
            return Err(ExtractError::Options(format!(
                "Duplicate column name: {name:?}"
            )));
        }
    }
    Ok(())
}
