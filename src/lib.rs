//! benchdash - benchmark latency dashboard
//!
//! Loads a CSV of benchmark timings, normalizes mixed-unit `Time` strings to
//! milliseconds, averages them per `Model`, and serves the result as a bar
//! chart on a local web page.
//!
//! Every stage before the server is a plain function of its input, so the
//! pipeline can be driven and tested without opening a socket:
//!
//! ```no_run
//! use benchdash::config::DashboardConfig;
//!
//! let config = DashboardConfig::default();
//! let output = benchdash::pipeline::run(&config)?;
//! for row in &output.aggregates {
//!     println!("{}: {:.3} ms", row.model, row.average_time_millis);
//! }
//! # Ok::<(), benchdash::error::DashError>(())
//! ```

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod dashboard;
pub mod error;
pub mod json_output;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod server;
