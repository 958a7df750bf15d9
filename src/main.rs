use anyhow::{Context, Result};
use benchdash::cli::{Cli, OutputFormat};
use benchdash::config::DashboardConfig;
use benchdash::csv_output::CsvAggregateOutput;
use benchdash::json_output::JsonReport;
use benchdash::pipeline::{self, PipelineOutput};
use benchdash::server;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises everything to TRACE
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the aggregate table in human-readable form
fn print_text_report(output: &PipelineOutput) {
    println!("{:<24} {:>14} {:>8} {:>8}", "Model", "avg ms", "samples", "missing");
    println!("{}", "─".repeat(57));
    for row in &output.aggregates {
        let avg = if row.has_average() {
            format!("{:.3}", row.average_time_millis)
        } else {
            "NaN".to_string()
        };
        println!(
            "{:<24} {:>14} {:>8} {:>8}",
            row.model, avg, row.samples, row.missing
        );
    }
    println!("{}", "─".repeat(57));
    println!(
        "{} rows, {} models, {} excluded",
        output.table.len(),
        output.aggregates.len(),
        output.excluded_count()
    );
}

fn print_report(
    format: OutputFormat,
    output: &PipelineOutput,
    config: &DashboardConfig,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text_report(output),
        OutputFormat::Csv => {
            print!("{}", CsvAggregateOutput::from_rows(&output.aggregates).to_csv())
        }
        OutputFormat::Json => {
            let report = JsonReport::new(
                config.input.display().to_string(),
                config.units,
                config.empty_groups,
                output,
            );
            println!("{}", report.to_json().context("Failed to serialize report")?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate()?;

    tracing::debug!("Effective configuration: {:?}", config);

    let output = pipeline::run(&config).with_context(|| {
        format!("Failed to build dashboard from {}", config.input.display())
    })?;

    if args.no_serve {
        return print_report(args.format, &output, &config);
    }

    let page = output.into_page(config.input.display().to_string());
    server::serve(&page, &config)?;

    Ok(())
}
