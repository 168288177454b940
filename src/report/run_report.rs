//! JSON run report

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CleaningCounts, EmptyTenurePolicy};
use crate::report::CleaningSummary;

/// Metadata about the run
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    pub churnprep_version: String,
    pub input_file: String,
    pub output_file: String,
    pub reference_file: String,
    pub empty_tenure_policy: EmptyTenurePolicy,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    pub rows_in: usize,
    pub rows_out: usize,
    pub rows_dropped: usize,
    pub tenure_mean: f64,
    pub metrics: CleaningCounts,
    /// Output header, in order
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<String>>,
}

/// Paths describing one run
pub struct RunPaths<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub reference: &'a Path,
}

impl RunReport {
    pub fn new(
        paths: RunPaths<'_>,
        policy: EmptyTenurePolicy,
        features: &[String],
        summary: &CleaningSummary,
    ) -> Self {
        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                churnprep_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: paths.input.display().to_string(),
                output_file: paths.output.display().to_string(),
                reference_file: paths.reference.display().to_string(),
                empty_tenure_policy: policy,
            },
            rows_in: summary.rows_in,
            rows_out: summary.rows_out,
            rows_dropped: summary.rows_dropped(),
            tenure_mean: summary.tenure_mean,
            metrics: summary.counts,
            features: features.to_vec(),
            predictions: None,
        }
    }

    pub fn with_predictions(mut self, predictions: Vec<String>) -> Self {
        self.predictions = Some(predictions);
        self
    }
}

/// Export the run report to a JSON file
pub fn export_run_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize run report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run report to {}", output_path.display()))?;

    Ok(())
}
