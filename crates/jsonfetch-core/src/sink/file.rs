//! File sink: write to `<path>.part`, then rename into place.

use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{RecordSink, SinkError};

/// On-disk layout of the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFormat {
    /// One compact JSON value per line.
    JsonLines,
    /// A single pretty-printed JSON array.
    JsonArray,
}

impl SinkFormat {
    /// `.jsonl` / `.ndjson` select JSON Lines; everything else is an array.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") => {
                SinkFormat::JsonLines
            }
            _ => SinkFormat::JsonArray,
        }
    }
}

/// Writes records to a file. The final path only appears once the whole
/// batch has been written and synced.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    format: SinkFormat,
}

impl JsonFileSink {
    /// Format is picked from the extension of `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SinkFormat::from_path(&path);
        Self { path, format }
    }

    pub fn with_format(path: impl Into<PathBuf>, format: SinkFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SinkFormat {
        self.format
    }

    fn temp_path(&self) -> PathBuf {
        let mut o = self.path.as_os_str().to_owned();
        o.push(".part");
        PathBuf::from(o)
    }

    fn io_err(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordSink for JsonFileSink {
    fn write_jsons(&mut self, records: &[Value]) -> Result<(), SinkError> {
        let temp_path = self.temp_path();
        let file = File::create(&temp_path).map_err(|e| self.io_err(e))?;
        let mut out = BufWriter::new(file);

        match self.format {
            SinkFormat::JsonLines => {
                for record in records {
                    serde_json::to_writer(&mut out, record)?;
                    out.write_all(b"\n").map_err(|e| self.io_err(e))?;
                }
            }
            SinkFormat::JsonArray => {
                serde_json::to_writer_pretty(&mut out, records)?;
                out.write_all(b"\n").map_err(|e| self.io_err(e))?;
            }
        }

        let file = out.into_inner().map_err(|e| self.io_err(e.into_error()))?;
        file.sync_all().map_err(|e| self.io_err(e))?;
        drop(file);
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_err(e))?;

        tracing::info!(
            path = %self.path.display(),
            count = records.len(),
            format = ?self.format,
            "records written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_from_extension() {
        assert_eq!(SinkFormat::from_path(Path::new("out.jsonl")), SinkFormat::JsonLines);
        assert_eq!(SinkFormat::from_path(Path::new("out.NDJSON")), SinkFormat::JsonLines);
        assert_eq!(SinkFormat::from_path(Path::new("out.json")), SinkFormat::JsonArray);
        assert_eq!(SinkFormat::from_path(Path::new("out")), SinkFormat::JsonArray);
    }

    #[test]
    fn json_lines_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        let mut sink = JsonFileSink::new(&path);
        sink.write_jsons(&[json!({"a": 1}), json!({"b": 2})]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\"a\":1}\n{\"b\":2}\n");
        assert!(!dir.path().join("records.jsonl.part").exists());
    }

    #[test]
    fn json_array_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut sink = JsonFileSink::new(&path);
        let records = vec![json!({"a": 1}), json!([1, 2])];
        sink.write_jsons(&records).unwrap();

        let parsed: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn empty_batch_still_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        JsonFileSink::new(&path).write_jsons(&[]).unwrap();
        let parsed: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.json");
        let err = JsonFileSink::new(&path).write_jsons(&[json!(1)]).unwrap_err();
        assert!(matches!(err, SinkError::Io { .. }));
    }
}
