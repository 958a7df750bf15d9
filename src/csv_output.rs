//! CSV output format for aggregate rows (`--format csv`)

use crate::aggregate::AggregateRow;

/// CSV output formatter for aggregate rows
#[derive(Debug, Default)]
pub struct CsvAggregateOutput {
    rows: Vec<AggregateRow>,
}

impl CsvAggregateOutput {
    pub fn from_rows(rows: &[AggregateRow]) -> Self {
        Self {
            rows: rows.to_vec(),
        }
    }

    fn header() -> &'static str {
        "Model,AverageTimeMillis,Samples,Missing,MinTimeMillis,MaxTimeMillis,SolvedRate"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_optional(value: Option<f64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    /// Format a row; a NaN average is written as `NaN`
    fn format_row(row: &AggregateRow) -> String {
        let fields = [
            Self::escape_field(&row.model),
            row.average_time_millis.to_string(),
            row.samples.to_string(),
            row.missing.to_string(),
            Self::format_optional(row.min_time_millis),
            Self::format_optional(row.max_time_millis),
            Self::format_optional(row.solved_rate),
        ];
        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}
