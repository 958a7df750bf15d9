//! Dashboard configuration
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional TOML file (`--config`), then command-line flags.
//!
//! ```toml
//! input = "data/output.csv"
//! host = "127.0.0.1"
//! port = 8050
//! units = "narrow"        # or "full"
//! empty_groups = "omit"   # or "nan"
//! delimiter = ","
//! title = "Average Time by Model"
//! ```

use crate::aggregate::EmptyGroupPolicy;
use crate::chart::DEFAULT_TITLE;
use crate::error::{DashError, Result};
use crate::normalize::UnitRule;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input file read when none is given
pub const DEFAULT_INPUT: &str = "./data/output.csv";

/// Complete configuration for one dashboard run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// CSV file with `Model` and `Time` columns
    pub input: PathBuf,
    pub host: String,
    pub port: u16,
    /// Unit conversion rule for `Time`
    pub units: UnitRule,
    /// Reporting of models with no usable timings
    pub empty_groups: EmptyGroupPolicy,
    pub delimiter: char,
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            host: "127.0.0.1".to_string(),
            port: 8050,
            units: UnitRule::Narrow,
            empty_groups: EmptyGroupPolicy::Omit,
            delimiter: ',',
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read a TOML config file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DashError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| DashError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(DashError::Config("port must be in 1..=65535".to_string()));
        }

        if self.host.trim().is_empty() {
            return Err(DashError::Config("host must not be empty".to_string()));
        }

        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(DashError::Config(format!(
                "delimiter must be a single ASCII character other than quote or newline, got {:?}",
                self.delimiter
            )));
        }

        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    /// `host:port` for binding the server
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
