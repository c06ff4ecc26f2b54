//! Rows of the original-vs-simplified comparison table.
//!
//! Statistics that cannot be computed are shown as [`NOT_AVAILABLE`] rather
//! than failing the whole table.

use crate::data::payload::ResultsPayload;
use crate::processing::statistics::{self, MissingPolicy, StatsError};

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub title: &'static str,
    pub original: String,
    pub simplified: String,
    pub difference: String,
}

impl ComparisonRow {
    fn new(
        title: &'static str,
        original: impl Into<String>,
        simplified: impl Into<String>,
        difference: impl Into<String>,
    ) -> Self {
        Self {
            title,
            original: original.into(),
            simplified: simplified.into(),
            difference: difference.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub rows: Vec<ComparisonRow>,
    pub file_name: String,
}

impl ComparisonReport {
    pub fn build(payload: &ResultsPayload, policy: MissingPolicy) -> Self {
        let original = &payload.data.original;
        let simplified = &payload.data.simplified;

        let reduction = statistics::reduction_percent_with(original, simplified, policy);
        let points = ComparisonRow::new(
            "No. of data points",
            original.len().to_string(),
            statistics::valid_count_with(simplified, policy).to_string(),
            reduction
                .map(|p| format!("{p}% less"))
                .unwrap_or_else(|_| not_available()),
        );

        let mean = stat_row(
            "Mean Value",
            statistics::mean_with(original, policy),
            statistics::mean_with(simplified, policy),
        );
        let std_dev = stat_row(
            "Standard deviation",
            statistics::standard_deviation_with(original, policy),
            statistics::standard_deviation_with(simplified, policy),
        );

        let running_time = match payload.timings {
            Some(t) => {
                let saved = t.original_secs - t.simplified_secs;
                let direction = if saved >= 0.0 { "faster" } else { "slower" };
                ComparisonRow::new(
                    "Running time",
                    format!("{:.2} s", t.original_secs),
                    format!("{:.2} s", t.simplified_secs),
                    format!("{:.2} s {direction}", saved.abs()),
                )
            }
            None => ComparisonRow::new("Running time", NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE),
        };

        let original_size = payload.file.as_ref().map(|f| f.size);
        let file_size = ComparisonRow::new(
            "File size",
            original_size.map_or_else(not_available, format_mb),
            payload.simplified_file_size.map_or_else(not_available, format_mb),
            match (original_size, payload.simplified_file_size) {
                (Some(o), Some(s)) => {
                    let saved = o - s;
                    let direction = if saved >= 0.0 { "less" } else { "more" };
                    format!("{} {direction}", format_mb(saved.abs()))
                }
                _ => not_available(),
            },
        );

        let file_name = payload
            .file
            .as_ref()
            .map(|f| f.name.clone())
            .unwrap_or_else(not_available);

        Self {
            rows: vec![points, mean, std_dev, running_time, file_size],
            file_name,
        }
    }

    /// Tab-separated text of the table, header first, for the clipboard.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("\tOriginal\tSimplified\tDifference\n");
        for row in &self.rows {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                row.title, row.original, row.simplified, row.difference
            ));
        }
        out.push_str(&format!("File name\t{}\t\t\n", self.file_name));
        out
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn format_mb(size: f64) -> String {
    format!("{size:.2} mb")
}

fn format_stat(value: &Result<f64, StatsError>) -> String {
    match value {
        Ok(v) => format!("{v:.2}"),
        Err(e) => {
            tracing::debug!("Statistic unavailable: {e}");
            not_available()
        }
    }
}

/// Relative change of the simplified value against the original, in percent.
fn relative_difference(original: f64, simplified: f64) -> Option<f64> {
    if original == 0.0 {
        None
    } else {
        Some((simplified - original).abs() / original.abs() * 100.0)
    }
}

fn stat_row(
    title: &'static str,
    original: Result<f64, StatsError>,
    simplified: Result<f64, StatsError>,
) -> ComparisonRow {
    let difference = match (&original, &simplified) {
        (Ok(o), Ok(s)) => relative_difference(*o, *s)
            .map_or_else(not_available, |pct| format!("{pct:.2}% diff")),
        _ => not_available(),
    };
    ComparisonRow::new(title, format_stat(&original), format_stat(&simplified), difference)
}
