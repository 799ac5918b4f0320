//! Output sinks - where a step hands off its finished batch.
//!
//! The host framework supplies a sink; the step calls it exactly once with
//! the full ordered batch. [`JsonLinesSink`] writes one JSON document per
//! line, the format consumed by downstream pipeline steps.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Output boundary accepting one call with the full ordered batch
pub trait BatchSink<R> {
    /// Hand off the batch. Called at most once per run.
    fn emit(&mut self, batch: &[R]) -> Result<()>;
}

/// Sink writing the batch as line-delimited JSON
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<R: Serialize, W: Write> BatchSink<R> for JsonLinesSink<W> {
    fn emit(&mut self, batch: &[R]) -> Result<()> {
        for record in batch {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Sink retaining emitted batches in memory, for tests and embedding
#[derive(Debug, Default)]
pub struct VecSink<R> {
    /// Every batch emitted, in emit order
    pub batches: Vec<Vec<R>>,
}

impl<R> VecSink<R> {
    /// Create an empty sink
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
        }
    }
}

impl<R: Clone> BatchSink<R> for VecSink<R> {
    fn emit(&mut self, batch: &[R]) -> Result<()> {
        self.batches.push(batch.to_vec());
        Ok(())
    }
}
