//! Statistics computed from the reference dataset

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Mean of a numeric column in a reference CSV. Nulls and unparseable cells are skipped.
pub fn reference_column_mean(path: &Path, column: &str) -> Result<f64> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .with_context(|| format!("Failed to load reference dataset: {}", path.display()))?
        .select([col(column).cast(DataType::Float64).mean()])
        .collect()
        .with_context(|| {
            format!(
                "Failed to compute mean of '{}' in {}",
                column,
                path.display()
            )
        })?;

    let mean = df.column(column)?.get(0)?;
    match mean {
        AnyValue::Float64(v) if v.is_finite() => Ok(v),
        _ => anyhow::bail!(
            "Reference dataset {} has no numeric values in column '{}'",
            path.display(),
            column
        ),
    }
}
