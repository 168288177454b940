//! Scoring harness: run a loaded forest over a cleaned output file

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use super::forest::RandomForestModel;

/// Predictions and model facts for one scored file
#[derive(Debug, Clone)]
pub struct ScoringReport {
    pub n_estimators: usize,
    pub first_tree_features: Option<usize>,
    pub predictions: Vec<String>,
}

/// Read the cleaned CSV into one row per record, with columns in `feature_names` order.
pub fn load_feature_matrix(path: &Path, feature_names: &[String]) -> Result<Vec<Vec<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    let mut rows = vec![Vec::with_capacity(feature_names.len()); df.height()];
    for name in feature_names {
        let series = df
            .column(name)
            .with_context(|| format!("Column '{}' not found in {}", name, path.display()))?
            .as_materialized_series()
            .cast(&DataType::Float64)?;

        for (i, value) in series.f64()?.into_iter().enumerate() {
            let value = value.ok_or_else(|| {
                anyhow::anyhow!("Column '{}' has a missing value on data row {}", name, i + 1)
            })?;
            rows[i].push(value);
        }
    }

    Ok(rows)
}

/// Score a cleaned file. Columns are taken in the model's own feature order
/// when it records one, otherwise in `default_features` order.
pub fn score_file(
    model: &RandomForestModel,
    path: &Path,
    default_features: &[String],
) -> Result<ScoringReport> {
    let features = if model.feature_names.is_empty() {
        default_features
    } else {
        model.feature_names.as_slice()
    };

    let rows = load_feature_matrix(path, features)?;
    let predictions = model.predict(&rows)?;
    tracing::info!(rows = rows.len(), "scored cleaned output");

    Ok(ScoringReport {
        n_estimators: model.n_estimators,
        first_tree_features: model.first_tree_features(),
        predictions,
    })
}

pub fn print_scoring_report(report: &ScoringReport) {
    println!(
        "      Number of trees in the forest: {}",
        style(report.n_estimators).yellow().bold()
    );
    if let Some(n) = report.first_tree_features {
        println!(
            "      Features considered in the first tree: {}",
            style(n).yellow().bold()
        );
    }
    println!("      Predictions: [{}]", report.predictions.join(", "));
}
