//! CSV loading for benchmark result files
//!
//! Reads the whole file into memory, keeps the header and row order, and
//! pulls out the `Model` and `Time` columns the rest of the pipeline needs.
//! An optional `Correct` column (written by the solver harness) is picked up
//! when present.

use crate::error::{DashError, Result};
use std::fs::File;
use std::path::Path;

/// Column holding the categorical group key
pub const MODEL_COLUMN: &str = "Model";
/// Column holding the raw duration string
pub const TIME_COLUMN: &str = "Time";
/// Optional column holding a per-row success flag
pub const CORRECT_COLUMN: &str = "Correct";

/// One raw row of the input table
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number in the source file
    pub line: u64,
    pub model: String,
    /// Raw duration with embedded unit, e.g. `120ms` or `1.5s`
    pub time: String,
    /// Parsed `Correct` flag, if the column exists and reads true/false
    pub correct: Option<bool>,
    /// Every field of the row, in header order
    pub fields: Vec<String>,
}

/// In-memory table of records, in file order
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// CSV loader with a configurable delimiter
#[derive(Debug, Clone, Copy)]
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvLoader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Load a CSV file from disk
    ///
    /// Fails with [`DashError::File`] when the path cannot be opened and with
    /// [`DashError::Parse`] when the content is not well-formed delimited
    /// text (ragged rows, invalid UTF-8).
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DashError::File {
            path: path.to_path_buf(),
            source,
        })?;

        let table = self.load_from_reader(file, path)?;
        tracing::info!(
            "Loaded {} rows ({} columns) from {}",
            table.len(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }

    /// Load CSV content from any reader; `origin` is only used in diagnostics
    pub fn load_from_reader<R: std::io::Read>(&self, reader: R, origin: &Path) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| parse_error(origin, &e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let model_idx = column_index(&headers, MODEL_COLUMN)?;
        let time_idx = column_index(&headers, TIME_COLUMN)?;
        let correct_idx = headers.iter().position(|h| h == CORRECT_COLUMN);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| parse_error(origin, &e))?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<String> = row.iter().map(str::to_string).collect();

            records.push(Record {
                line,
                model: fields.get(model_idx).cloned().unwrap_or_default(),
                time: fields.get(time_idx).cloned().unwrap_or_default(),
                correct: correct_idx
                    .and_then(|i| fields.get(i))
                    .and_then(|f| parse_flag(f)),
                fields,
            });
        }

        Ok(Table { headers, records })
    }
}

fn column_index(headers: &[String], column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DashError::MissingColumn {
            column: column.to_string(),
            available: headers.to_vec(),
        })
}

fn parse_error(origin: &Path, err: &csv::Error) -> DashError {
    DashError::Parse {
        path: origin.to_path_buf(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
