//! Load → normalize → aggregate → chart, with no server involved

use crate::aggregate::{AggregateRow, Aggregator};
use crate::chart::ChartSpec;
use crate::config::DashboardConfig;
use crate::dashboard::DashboardPage;
use crate::error::Result;
use crate::loader::{CsvLoader, Table};
use crate::normalize::{NormalizedRecord, TimeNormalizer};
use std::path::{Path, PathBuf};

/// Everything the pipeline produced, stage by stage
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: Table,
    pub normalized: Vec<NormalizedRecord>,
    pub aggregates: Vec<AggregateRow>,
    pub chart: ChartSpec,
}

impl PipelineOutput {
    /// Records excluded from averages: time gaps plus blank-model rows
    pub fn excluded_count(&self) -> usize {
        self.normalized.iter().filter(|r| r.is_excluded()).count()
    }

    /// Wrap the chart and summary into a dashboard page
    pub fn into_page(self, source: impl Into<String>) -> DashboardPage {
        DashboardPage::new(self.chart, self.aggregates).with_source(source)
    }
}

/// The four in-process stages, configured once
#[derive(Debug, Clone)]
pub struct Pipeline {
    input: PathBuf,
    loader: CsvLoader,
    normalizer: TimeNormalizer,
    aggregator: Aggregator,
    title: String,
}

impl Pipeline {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            input: config.input.clone(),
            loader: CsvLoader::new(config.delimiter_byte()),
            normalizer: TimeNormalizer::new(config.units),
            aggregator: Aggregator::new(config.empty_groups),
            title: config.title.clone(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Run every stage on an already loaded table
    pub fn process(&self, table: Table) -> PipelineOutput {
        let normalized = self.normalizer.normalize_table(&table);
        let aggregates = self.aggregator.aggregate(&normalized);
        let chart = ChartSpec::from_aggregates(&aggregates).with_title(self.title.clone());

        PipelineOutput {
            table,
            normalized,
            aggregates,
            chart,
        }
    }

    /// Load the configured file and run every stage
    pub fn run(&self) -> Result<PipelineOutput> {
        let table = self.loader.load(&self.input)?;
        Ok(self.process(table))
    }
}

/// Convenience: build a pipeline from `config` and run it
pub fn run(config: &DashboardConfig) -> Result<PipelineOutput> {
    Pipeline::new(config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::EmptyGroupPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    fn config_for(file: &NamedTempFile) -> DashboardConfig {
        DashboardConfig {
            input: file.path().to_path_buf(),
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn test_scenario_mixed_units() {
        let file = write_csv("Model,Time\nm1,100ms\nm1,1s\nm2,50ms\n");
        let output = run(&config_for(&file)).expect("pipeline");

        let millis: Vec<_> = output.normalized.iter().map(|r| r.time_millis).collect();
        assert_eq!(millis, vec![Some(100.0), Some(1000.0), Some(50.0)]);

        assert_eq!(output.aggregates.len(), 2);
        assert_eq!(output.aggregates[0].model, "m1");
        assert_eq!(output.aggregates[0].average_time_millis, 550.0);
        assert_eq!(output.aggregates[1].average_time_millis, 50.0);
        assert_eq!(output.chart.categories(), vec!["m1", "m2"]);
    }

    #[test]
    fn test_scenario_gap_only_model() {
        let file = write_csv("Model,Time\nm3,abc\nm1,5ms\n");
        let output = run(&config_for(&file)).expect("pipeline");
        assert_eq!(output.excluded_count(), 1);
        assert!(output.aggregates.iter().all(|r| r.model != "m3"));

        let config = DashboardConfig {
            empty_groups: EmptyGroupPolicy::Nan,
            ..config_for(&file)
        };
        let output = run(&config).expect("pipeline");
        let m3 = output
            .aggregates
            .iter()
            .find(|r| r.model == "m3")
            .expect("m3 row");
        assert!(m3.average_time_millis.is_nan());
    }

    #[test]
    fn test_rerun_is_identical() {
        let file = write_csv(
            "Puzzle,Model,Time,Correct\np,A,1.25ms,true\np,B,2s,true\np,A,3ms,false\n",
        );
        let pipeline = Pipeline::new(&config_for(&file));
        assert_eq!(pipeline.input(), file.path());

        let first = pipeline.run().expect("first run");
        let second = pipeline.run().expect("second run");
        assert_eq!(first.aggregates, second.aggregates);
        assert_eq!(
            serde_json::to_string(&first.aggregates).expect("json"),
            serde_json::to_string(&second.aggregates).expect("json")
        );
    }

    #[test]
    fn test_blank_model_rows_not_charted() {
        let table = CsvLoader::default()
            .load_from_reader("Model,Time\n,100ms\nm1,5ms\n".as_bytes(), Path::new("inline.csv"))
            .expect("load");
        let output = Pipeline::new(&DashboardConfig::default()).process(table);

        assert_eq!(output.chart.categories(), vec!["m1"]);
        assert_eq!(output.aggregates[0].average_time_millis, 5.0);
        assert_eq!(output.excluded_count(), 1);
    }

    #[test]
    fn test_title_flows_to_chart_and_page() {
        let file = write_csv("Model,Time\nA,1ms\n");
        let config = DashboardConfig {
            title: "Solver latency".into(),
            ..config_for(&file)
        };
        let html = run(&config).expect("pipeline").into_page("bench.csv").to_html();
        assert!(html.contains("<h1>Solver latency</h1>"));
    }
}
