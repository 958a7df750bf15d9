//! Error taxonomy for the dashboard pipeline
//!
//! Every variant here is fatal. Per-record problems (a `Time` cell with no
//! number, a model with no usable timings) are not errors: they are carried
//! as `None` values through the pipeline instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a dashboard run
#[derive(Error, Debug)]
pub enum DashError {
    #[error("Cannot read file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {} at line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Required column '{column}' not found (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Dashboard server error: {0}")]
    Server(String),
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, DashError>;
