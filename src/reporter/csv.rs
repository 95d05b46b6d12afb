//! CSV export of analysis records

use crate::{Analysis, Metric};
use chrono::SecondsFormat;

/// Leading columns, followed by one column per metric
pub const CSV_HEADER: &str = "Fil,Talare,Parti,Totalpoäng,Datum";

/// Quote a field when it contains a separator, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Reporter for spreadsheet export
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }

    fn header() -> String {
        let mut columns = vec![CSV_HEADER.to_string()];
        columns.extend(Metric::ALL.iter().map(|m| m.to_string()));
        columns.join(",")
    }

    fn row(analysis: &Analysis) -> String {
        let mut fields = vec![
            escape_field(&analysis.file_name),
            escape_field(&analysis.speaker),
            escape_field(&analysis.party),
            analysis.total_score.to_string(),
            analysis.date.to_rfc3339_opts(SecondsFormat::Millis, true),
        ];
        fields.extend(analysis.scores.entries().map(|(_, v)| v.to_string()));
        fields.join(",")
    }

    /// Header plus one row per analysis, newline-terminated
    pub fn report_many(&self, results: &[Analysis]) -> String {
        let mut out = Self::header();
        out.push('\n');
        for analysis in results {
            out.push_str(&Self::row(analysis));
            out.push('\n');
        }
        out
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}
