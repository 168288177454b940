//! Input reader for raw churn CSV files

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use super::config::PipelineConfig;
use super::error::CleanError;
use super::record::{record_from_cells, Record};

/// True when the file has no non-blank line after its header (or no header at all)
pub fn is_csv_empty(path: &Path) -> Result<bool> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    // Header
    if lines.next().transpose()?.is_none() {
        return Ok(true);
    }

    for line in lines {
        if !line?.trim().is_empty() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Position of the leading column in the header
pub fn find_leading_column_index(header: &StringRecord, column: &str) -> Result<usize, CleanError> {
    header
        .iter()
        .position(|name| name.trim() == column)
        .ok_or_else(|| CleanError::LeadingColumnNotFound {
            column: column.to_string(),
        })
}

/// Raw records read from an input file
#[derive(Debug)]
pub struct LoadedInput {
    /// Index of the leading column in the input header
    pub offset: usize,
    pub records: Vec<Record>,
}

/// Read every data line into a record keyed by the canonical column names.
///
/// Columns before the leading column (index columns and the like) are skipped;
/// the remaining cells align positionally with `column_names`.
pub fn load_records(path: &Path, config: &PipelineConfig) -> Result<LoadedInput> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let header = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();
    let offset = find_leading_column_index(&header, &config.leading_column)?;

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Failed to read data line {}", line + 2))?;
        records.push(record_from_cells(config, row.iter().skip(offset)));
    }

    Ok(LoadedInput { offset, records })
}
