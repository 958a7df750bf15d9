//! Time normalization: mixed-unit duration strings to milliseconds
//!
//! The benchmark harness writes `Duration` values in their debug form
//! (`120ms`, `1.5s`, `850.2µs`, `40ns`). Two conversion rules are offered:
//!
//! - [`UnitRule::Narrow`] (default): only the exact unit `s` is scaled (x1000);
//!   every other unit, including a missing one, is taken to already be in
//!   milliseconds. This mis-converts `µs`, `ns`, `sec`, `m` and friends, and
//!   is kept as the default so existing dashboards keep their numbers.
//! - [`UnitRule::Full`]: a real unit table. Unknown units become gaps.
//!
//! Nothing here fails. A `Time` cell that yields no number (or, under the
//! full rule, no known unit) produces `time_millis = None` and is left out of
//! the aggregate.

use crate::loader::{Record, Table};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static VALUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("static value pattern"));
static NARROW_UNIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+").expect("static unit pattern"));
static FULL_UNIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zµμ]+").expect("static unit pattern"));

/// How unit suffixes are converted to milliseconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum UnitRule {
    /// `s` is seconds, anything else is already milliseconds
    #[default]
    Narrow,
    /// ns, us/µs, ms, s/sec, m/min, h
    Full,
}

/// A record with its time parsed into a canonical unit
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub record: Record,
    /// Leading numeric magnitude of `Time`
    pub time_value: Option<f64>,
    /// Unit suffix of `Time`
    pub time_unit: Option<String>,
    /// Value converted to milliseconds; `None` marks a gap
    pub time_millis: Option<f64>,
}

impl NormalizedRecord {
    pub fn model(&self) -> &str {
        &self.record.model
    }

    pub fn is_gap(&self) -> bool {
        self.time_millis.is_none()
    }

    /// A blank `Model` cell; such records belong to no group
    pub fn is_unlabeled(&self) -> bool {
        self.record.model.trim().is_empty()
    }

    /// Left out of every average, either as a gap or for lack of a model
    pub fn is_excluded(&self) -> bool {
        self.is_gap() || self.is_unlabeled()
    }
}

/// Extract the first numeric run (digits with at most one decimal point)
pub fn extract_value(time: &str) -> Option<f64> {
    VALUE_PATTERN
        .find(time)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Extract the first run of unit letters anywhere in the string
pub fn extract_unit(time: &str, rule: UnitRule) -> Option<String> {
    let pattern = match rule {
        UnitRule::Narrow => &*NARROW_UNIT_PATTERN,
        UnitRule::Full => &*FULL_UNIT_PATTERN,
    };
    pattern.find(time).map(|m| m.as_str().to_string())
}

/// Milliseconds per unit under the full table
fn full_unit_scale(unit: &str) -> Option<f64> {
    match unit {
        "ns" => Some(1e-6),
        "us" | "µs" | "μs" => Some(1e-3),
        "ms" => Some(1.0),
        "s" | "sec" => Some(1_000.0),
        "m" | "min" => Some(60_000.0),
        "h" => Some(3_600_000.0),
        _ => None,
    }
}

/// Convert a parsed magnitude and unit to milliseconds
pub fn to_millis(value: Option<f64>, unit: Option<&str>, rule: UnitRule) -> Option<f64> {
    let value = value?;
    match rule {
        UnitRule::Narrow => match unit {
            Some("s") => Some(value * 1_000.0),
            _ => Some(value),
        },
        UnitRule::Full => unit.and_then(full_unit_scale).map(|scale| value * scale),
    }
}

/// Applies a [`UnitRule`] to records
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeNormalizer {
    rule: UnitRule,
}

impl TimeNormalizer {
    pub fn new(rule: UnitRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> UnitRule {
        self.rule
    }

    /// Normalize a single record
    pub fn normalize(&self, record: Record) -> NormalizedRecord {
        let time_value = extract_value(&record.time);
        let time_unit = extract_unit(&record.time, self.rule);
        let time_millis = to_millis(time_value, time_unit.as_deref(), self.rule);

        if time_millis.is_none() {
            tracing::debug!(
                "Line {}: time {:?} for model {:?} has no usable value",
                record.line,
                record.time,
                record.model
            );
        }

        NormalizedRecord {
            record,
            time_value,
            time_unit,
            time_millis,
        }
    }

    /// Normalize every record of a table, preserving order
    pub fn normalize_table(&self, table: &Table) -> Vec<NormalizedRecord> {
        let normalized: Vec<NormalizedRecord> = table
            .records
            .iter()
            .cloned()
            .map(|r| self.normalize(r))
            .collect();

        let gaps = normalized.iter().filter(|r| r.is_gap()).count();
        if gaps > 0 {
            tracing::warn!(
                "{} of {} rows have no usable time and are excluded from averages",
                gaps,
                normalized.len()
            );
        }

        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str, time: &str) -> Record {
        Record {
            line: 2,
            model: model.to_string(),
            time: time.to_string(),
            correct: None,
            fields: vec![model.to_string(), time.to_string()],
        }
    }

    fn narrow(time: &str) -> NormalizedRecord {
        TimeNormalizer::default().normalize(record("m", time))
    }

    fn full(time: &str) -> NormalizedRecord {
        TimeNormalizer::new(UnitRule::Full).normalize(record("m", time))
    }

    #[test]
    fn test_extract_value_first_match_only() {
        assert_eq!(extract_value("120ms"), Some(120.0));
        assert_eq!(extract_value("1.5s"), Some(1.5));
        assert_eq!(extract_value("took 3.25ms then 9ms"), Some(3.25));
        assert_eq!(extract_value("1.2.3s"), Some(1.2));
        assert_eq!(extract_value("abc"), None);
        assert_eq!(extract_value(""), None);
    }

    #[test]
    fn test_extract_unit_anywhere() {
        assert_eq!(extract_unit("120ms", UnitRule::Narrow).as_deref(), Some("ms"));
        assert_eq!(extract_unit("ms 120", UnitRule::Narrow).as_deref(), Some("ms"));
        assert_eq!(extract_unit("120", UnitRule::Narrow), None);
        assert_eq!(extract_unit("120MS", UnitRule::Narrow), None);
    }

    #[test]
    fn test_narrow_micro_sign_is_not_a_letter() {
        assert_eq!(extract_unit("850µs", UnitRule::Narrow).as_deref(), Some("s"));
        assert_eq!(narrow("850µs").time_millis, Some(850_000.0));
    }

    #[test]
    fn test_narrow_seconds_scaled() {
        let n = narrow("1.5s");
        assert_eq!(n.time_value, Some(1.5));
        assert_eq!(n.time_unit.as_deref(), Some("s"));
        assert_eq!(n.time_millis, Some(1500.0));
    }

    #[test]
    fn test_narrow_milliseconds_passthrough() {
        assert_eq!(narrow("120ms").time_millis, Some(120.0));
    }

    #[test]
    fn test_narrow_other_units_passthrough() {
        assert_eq!(narrow("2sec").time_millis, Some(2.0));
        assert_eq!(narrow("40ns").time_millis, Some(40.0));
        assert_eq!(narrow("3m").time_millis, Some(3.0));
        assert_eq!(narrow("7").time_millis, Some(7.0));
    }

    #[test]
    fn test_missing_value_is_gap_regardless_of_unit() {
        let n = narrow("abc");
        assert_eq!(n.time_value, None);
        assert_eq!(n.time_unit.as_deref(), Some("abc"));
        assert_eq!(n.time_millis, None);
        assert!(n.is_gap());

        assert!(full("s").is_gap());
    }

    #[test]
    fn test_full_unit_table() {
        assert_eq!(full("850µs").time_millis, Some(0.85));
        assert_eq!(full("850μs").time_millis, Some(0.85));
        assert_eq!(full("500us").time_millis, Some(0.5));
        assert_eq!(full("2000000ns").time_millis, Some(2.0));
        assert_eq!(full("120ms").time_millis, Some(120.0));
        assert_eq!(full("2sec").time_millis, Some(2000.0));
        assert_eq!(full("1m").time_millis, Some(60_000.0));
        assert_eq!(full("1h").time_millis, Some(3_600_000.0));
    }

    #[test]
    fn test_full_unknown_or_missing_unit_is_gap() {
        assert!(full("12 fortnights").is_gap());
        assert!(full("12").is_gap());
    }

    #[test]
    fn test_normalize_table_preserves_order() {
        let table = Table {
            headers: vec!["Model".into(), "Time".into()],
            records: vec![record("m1", "100ms"), record("m1", "1s"), record("m2", "50ms")],
        };
        let normalized = TimeNormalizer::default().normalize_table(&table);
        let millis: Vec<_> = normalized.iter().map(|r| r.time_millis).collect();
        assert_eq!(millis, vec![Some(100.0), Some(1000.0), Some(50.0)]);
        assert_eq!(normalized[2].model(), "m2");
    }

    #[test]
    fn test_unit_rule_serde_names() {
        let rule: UnitRule = serde_json::from_str("\"full\"").expect("parse");
        assert_eq!(rule, UnitRule::Full);
        assert_eq!(serde_json::to_string(&UnitRule::Narrow).expect("ser"), "\"narrow\"");
    }
}
