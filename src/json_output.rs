//! JSON output format for aggregate reports (`--format json`)

use crate::aggregate::{AggregateRow, EmptyGroupPolicy};
use crate::normalize::UnitRule;
use crate::pipeline::PipelineOutput;
use serde::{Deserialize, Serialize};

/// A complete aggregate report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Input file the report was built from
    pub input: String,
    pub units: UnitRule,
    pub empty_groups: EmptyGroupPolicy,
    /// Data rows read
    pub total_records: usize,
    /// Rows excluded from averages
    pub excluded_records: usize,
    /// Per-model rows; a NaN average is written as `null`
    pub models: Vec<AggregateRow>,
}

impl JsonReport {
    pub fn new(
        input: impl Into<String>,
        units: UnitRule,
        empty_groups: EmptyGroupPolicy,
        output: &PipelineOutput,
    ) -> Self {
        Self {
            input: input.into(),
            units,
            empty_groups,
            total_records: output.table.len(),
            excluded_records: output.excluded_count(),
            models: output.aggregates.clone(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
