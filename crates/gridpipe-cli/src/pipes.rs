//! Pipe-file emitter - the standalone compatibility output boundary.
//!
//! Instead of handing one batch to a framework sink, the standalone runner
//! writes one line-delimited-record `.pipe` file per matched worksheet and
//! records the written filenames plus a success marker in a status file the
//! host orchestrator reads back.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use gridpipe_core::{BatchSink, JsonLinesSink};
use gridpipe_data::SheetBatch;

/// Extension of per-sheet record files
pub const PIPE_EXTENSION: &str = ".pipe";
/// Marker prefixing the comma-separated filename list in the status file
pub const OUTPUT_PIPES_PREFIX: &str = "outputPipes:";
/// Marker on the status file's second line signalling success
pub const SUCCESS_MARKER: &str = "result:success";

/// Derive the output filename for a worksheet title.
///
/// Titles come from remote data, so path separators are replaced before the
/// title is used as a filename.
pub fn pipe_filename(title: &str) -> String {
    let safe: String = title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{safe}{PIPE_EXTENSION}")
}

/// Write one `.pipe` file per sheet batch under `output_dir`.
///
/// Returns the written filenames in sheet order. A write failure here
/// propagates; the compatibility variant has no per-file isolation.
pub fn write_sheet_pipes(output_dir: &Path, sheets: &[SheetBatch]) -> Result<Vec<String>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Could not create output directory {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let filename = pipe_filename(&sheet.title);
        let path = output_dir.join(&filename);
        let file = File::create(&path)
            .with_context(|| format!("Could not create {}", path.display()))?;
        let mut sink = JsonLinesSink::new(BufWriter::new(file));
        sink.emit(&sheet.records)
            .with_context(|| format!("Could not write {}", path.display()))?;
        written.push(filename);
    }
    Ok(written)
}

/// Write the two-line status file the host orchestrator consumes:
/// the filename list prefixed by its marker, then the success marker.
pub fn write_termination_log(path: &Path, filenames: &[String]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not write termination log {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{OUTPUT_PIPES_PREFIX}{}", filenames.join(","))?;
    writeln!(writer, "{SUCCESS_MARKER}")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpipe_data::Record;
    use serde_json::json;

    fn batch(title: &str, id: &str, values: &[&str]) -> SheetBatch {
        let records = values
            .iter()
            .map(|v| {
                let mut record = Record::new();
                record.insert("value", json!(v));
                record.set_provenance(title, id);
                record
            })
            .collect();
        SheetBatch {
            title: title.to_string(),
            sheet_id: id.to_string(),
            records,
        }
    }

    #[test]
    fn test_pipe_filename() {
        assert_eq!(pipe_filename("Jan"), "Jan.pipe");
        assert_eq!(pipe_filename("Q1/Q2"), "Q1_Q2.pipe");
        assert_eq!(pipe_filename(r"a\b"), "a_b.pipe");
    }

    #[test]
    fn test_write_sheet_pipes() {
        let dir = tempfile::tempdir().unwrap();
        let sheets = vec![batch("Jan", "0", &["10", "20"]), batch("Feb", "1", &["5"])];

        let written = write_sheet_pipes(dir.path(), &sheets).unwrap();
        assert_eq!(written, vec!["Jan.pipe", "Feb.pipe"]);

        let jan = fs::read_to_string(dir.path().join("Jan.pipe")).unwrap();
        let lines: Vec<&str> = jan.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["value"], json!("10"));
        assert_eq!(first["_sheet_title"], json!("Jan"));
    }

    #[test]
    fn test_write_sheet_pipes_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("pipes");
        write_sheet_pipes(&nested, &[batch("Jan", "0", &["1"])]).unwrap();
        assert!(nested.join("Jan.pipe").exists());
    }

    #[test]
    fn test_termination_log_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termination-log");
        let filenames = vec!["Jan.pipe".to_string(), "Feb.pipe".to_string()];

        write_termination_log(&path, &filenames).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "outputPipes:Jan.pipe,Feb.pipe\nresult:success\n");
    }

    #[test]
    fn test_termination_log_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termination-log");
        write_termination_log(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "outputPipes:\nresult:success\n");
    }
}
