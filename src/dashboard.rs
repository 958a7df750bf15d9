//! Single-page HTML dashboard
//!
//! Wraps the latency chart in a page with embedded CSS and a summary table
//! of the aggregates. The page is rendered once and served as-is.

use crate::aggregate::AggregateRow;
use crate::chart::ChartSpec;

/// plotly.js bundle loaded by the page
pub const PLOTLY_JS_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

/// Element id of the chart container
pub const CHART_DIV_ID: &str = "latency-chart";

/// Rendered dashboard page
#[derive(Debug, Clone)]
pub struct DashboardPage {
    title: String,
    chart: ChartSpec,
    rows: Vec<AggregateRow>,
    source: Option<String>,
}

impl DashboardPage {
    pub fn new(chart: ChartSpec, rows: Vec<AggregateRow>) -> Self {
        Self {
            title: chart.title.clone(),
            chart,
            rows,
            source: None,
        }
    }

    /// Name of the input file shown in the footer
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        #latency-chart {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            height: 480px;
            margin-bottom: 20px;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .model {
            color: #0066cc;
            font-weight: bold;
            font-family: monospace;
        }
        .num {
            font-family: monospace;
            text-align: right;
        }
        .no-data {
            color: #cc0000;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    fn format_millis(value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => format!("{:.3}", v),
            _ => "n/a".to_string(),
        }
    }

    fn format_row(row: &AggregateRow) -> String {
        let avg_class = if row.has_average() {
            "num"
        } else {
            "num no-data"
        };
        let solved = match row.solved_rate {
            Some(rate) => format!("{:.1}%", rate * 100.0),
            None => String::new(),
        };

        format!(
            r#"<tr><td class="model">{}</td><td class="{}">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
            Self::escape_html(&row.model),
            avg_class,
            Self::format_millis(Some(row.average_time_millis)),
            row.samples,
            row.missing,
            Self::format_millis(row.min_time_millis),
            Self::format_millis(row.max_time_millis),
            solved
        )
    }

    fn render_summary(&self) -> String {
        let mut html = String::new();

        html.push_str("    <h2>Summary</h2>\n");
        html.push_str("    <table class=\"summary-table\">\n");
        html.push_str("        <tr><th>Model</th><th>avg ms</th><th>samples</th><th>missing</th><th>min ms</th><th>max ms</th><th>solved</th></tr>\n");

        for row in &self.rows {
            html.push_str("        ");
            html.push_str(&Self::format_row(row));
            html.push('\n');
        }

        html.push_str("    </table>\n");
        html
    }

    /// Generate the complete HTML document
    pub fn to_html(&self) -> String {
        let title = Self::escape_html(&self.title);
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("    <title>{}</title>\n", title));
        html.push_str(&format!(
            "    <script src=\"{}\" charset=\"utf-8\"></script>\n",
            PLOTLY_JS_CDN
        ));
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str(&format!("    <h1>{}</h1>\n", title));

        html.push_str(&self.chart.to_inline_html(CHART_DIV_ID));
        html.push('\n');

        html.push_str(&self.render_summary());

        html.push_str("    <div class=\"footer\">\n");
        if let Some(source) = &self.source {
            html.push_str(&format!(
                "        Source: {} &middot; ",
                Self::escape_html(source)
            ));
        } else {
            html.push_str("        ");
        }
        html.push_str("Generated by benchdash\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}
