//! Sheet selector - worksheet filtering by title pattern.

use regex::Regex;

use crate::error::{ExtractError, Result};
use crate::sources::WorksheetRef;

/// Pattern used when no title pattern is configured
pub const MATCH_ALL_PATTERN: &str = ".*";

/// Compile a worksheet-title pattern into a full-match regex.
///
/// The whole title must match; a pattern matching only a substring never
/// qualifies a worksheet. The pattern is wrapped in anchors here so callers
/// supply plain patterns.
pub fn compile_title_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(&format!(r"\A(?:{pattern})\z"))
        .map_err(|e| ExtractError::InvalidPattern(e.to_string()))
}

/// Filter worksheets whose title fully matches the pattern.
///
/// Output preserves the input enumeration order; each worksheet is matched
/// independently. An empty result is not an error.
pub fn select_sheets(sheets: &[WorksheetRef], pattern: &Regex) -> Vec<WorksheetRef> {
    sheets
        .iter()
        .filter(|sheet| pattern.is_match(&sheet.title))
        .cloned()
        .collect()
}
