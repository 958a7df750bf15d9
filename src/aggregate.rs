//! Per-model latency aggregation
//!
//! Groups normalized records by model and averages `time_millis` over the
//! records that have one. Gaps are excluded from both the sum and the count.

use crate::normalize::NormalizedRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do with a model whose every record is a gap
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EmptyGroupPolicy {
    /// Leave the model out of the output
    #[default]
    Omit,
    /// Emit the model with a NaN average
    Nan,
}

/// One output row per distinct model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub model: String,
    /// Mean of the usable timings, NaN for an empty group under [`EmptyGroupPolicy::Nan`]
    pub average_time_millis: f64,
    /// Records that contributed to the mean
    pub samples: usize,
    /// Records excluded as gaps
    pub missing: usize,
    pub min_time_millis: Option<f64>,
    pub max_time_millis: Option<f64>,
    /// Fraction of rows flagged correct, when the input has a `Correct` column
    pub solved_rate: Option<f64>,
}

impl AggregateRow {
    pub fn has_average(&self) -> bool {
        self.samples > 0
    }
}

/// Running totals for one model
#[derive(Debug, Default)]
struct GroupAccumulator {
    sum: f64,
    samples: usize,
    missing: usize,
    min: Option<f64>,
    max: Option<f64>,
    flagged: usize,
    correct: usize,
}

impl GroupAccumulator {
    fn push(&mut self, record: &NormalizedRecord) {
        match record.time_millis {
            Some(ms) => {
                self.sum += ms;
                self.samples += 1;
                self.min = Some(self.min.map_or(ms, |m| m.min(ms)));
                self.max = Some(self.max.map_or(ms, |m| m.max(ms)));
            }
            None => self.missing += 1,
        }

        if let Some(correct) = record.record.correct {
            self.flagged += 1;
            if correct {
                self.correct += 1;
            }
        }
    }

    fn finish(self, model: String) -> AggregateRow {
        let average_time_millis = if self.samples > 0 {
            self.sum / self.samples as f64
        } else {
            f64::NAN
        };

        let solved_rate = if self.flagged > 0 {
            Some(self.correct as f64 / self.flagged as f64)
        } else {
            None
        };

        AggregateRow {
            model,
            average_time_millis,
            samples: self.samples,
            missing: self.missing,
            min_time_millis: self.min,
            max_time_millis: self.max,
            solved_rate,
        }
    }
}

/// Groups records by model and computes mean latency
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    policy: EmptyGroupPolicy,
}

impl Aggregator {
    pub fn new(policy: EmptyGroupPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> EmptyGroupPolicy {
        self.policy
    }

    /// Reduce records to one row per model, in order of first appearance
    pub fn aggregate(&self, records: &[NormalizedRecord]) -> Vec<AggregateRow> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(String, GroupAccumulator)> = Vec::new();
        let mut unlabeled = 0usize;

        for record in records {
            if record.is_unlabeled() {
                tracing::debug!("Line {}: blank model; record skipped", record.record.line);
                unlabeled += 1;
                continue;
            }
            let slot = *index.entry(record.model()).or_insert_with(|| {
                groups.push((record.model().to_string(), GroupAccumulator::default()));
                groups.len() - 1
            });
            groups[slot].1.push(record);
        }

        let mut rows = Vec::with_capacity(groups.len());
        for (model, acc) in groups {
            let row = acc.finish(model);
            if !row.has_average() {
                match self.policy {
                    EmptyGroupPolicy::Omit => {
                        tracing::info!("Model {:?} has no usable timings; omitted", row.model);
                        continue;
                    }
                    EmptyGroupPolicy::Nan => {
                        tracing::info!(
                            "Model {:?} has no usable timings; average is NaN",
                            row.model
                        );
                    }
                }
            }
            rows.push(row);
        }

        if unlabeled > 0 {
            tracing::warn!("{} rows have a blank model and are excluded", unlabeled);
        }
        tracing::debug!(
            "Aggregated {} records into {} models",
            records.len(),
            rows.len()
        );
        rows
    }
}
