//! JSON reporter for machine-readable output

use crate::summary::AggregateStats;
use crate::Analysis;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single analysis as JSON
    pub fn report(&self, analysis: &Analysis) -> String {
        self.render(analysis, "{}")
    }

    /// Report multiple analyses as JSON array
    pub fn report_many(&self, results: &[Analysis]) -> String {
        self.render(results, "[]")
    }

    /// Report with summary
    pub fn report_with_summary(&self, results: &[Analysis], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results,
            summary: JsonSummary {
                average_grade: stats.average_score.grade.to_string(),
                stats,
            },
        };
        self.render(&output, "{}")
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [Analysis],
    summary: JsonSummary<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    average_grade: String,
    #[serde(flatten)]
    stats: &'a AggregateStats,
}
