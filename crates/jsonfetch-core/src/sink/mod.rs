//! Output sinks for fetched records.
//!
//! A sink takes the whole record list in one call; whatever atomicity the
//! sink offers is what the run gets.

mod file;

pub use file::{JsonFileSink, SinkFormat};

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("write output {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("encode records")]
    Encode(#[from] serde_json::Error),
}

/// Destination for the normalized record list.
pub trait RecordSink {
    fn write_jsons(&mut self, records: &[Value]) -> Result<(), SinkError>;
}

/// Keeps every written batch in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    batches: Vec<Vec<Value>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records written so far, in order.
    pub fn records(&self) -> Vec<Value> {
        self.batches.iter().flatten().cloned().collect()
    }

    /// Number of `write_jsons` calls received.
    pub fn write_count(&self) -> usize {
        self.batches.len()
    }
}

impl RecordSink for MemorySink {
    fn write_jsons(&mut self, records: &[Value]) -> Result<(), SinkError> {
        self.batches.push(records.to_vec());
        Ok(())
    }
}
