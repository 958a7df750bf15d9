//! CLI argument parsing for benchdash

use crate::aggregate::EmptyGroupPolicy;
use crate::config::DashboardConfig;
use crate::normalize::UnitRule;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the aggregate report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "benchdash")]
#[command(version)]
#[command(about = "Per-model benchmark latency dashboard", long_about = None)]
pub struct Cli {
    /// Benchmark results CSV with Model and Time columns [default: ./data/output.csv]
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// TOML configuration file (flags override its values)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind the dashboard server to [default: 127.0.0.1]
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port for the dashboard server [default: 8050]
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Unit conversion rule for the Time column [default: narrow]
    #[arg(long, value_enum, value_name = "RULE")]
    pub units: Option<UnitRule>,

    /// How to report models with no usable timings [default: omit]
    #[arg(long = "empty-groups", value_enum, value_name = "POLICY")]
    pub empty_groups: Option<EmptyGroupPolicy>,

    /// Field delimiter of the input file [default: ,]
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Chart and page title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Print the aggregate report and exit instead of serving the dashboard
    #[arg(long = "no-serve")]
    pub no_serve: bool,

    /// Report format (requires --no-serve)
    #[arg(long = "format", value_enum, default_value = "text", requires = "no_serve")]
    pub format: OutputFormat,

    /// Enable verbose trace logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Overlay the flags that were given onto `config`
    pub fn apply_to(&self, config: &mut DashboardConfig) {
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(units) = self.units {
            config.units = units;
        }
        if let Some(policy) = self.empty_groups {
            config.empty_groups = policy;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
    }
}
