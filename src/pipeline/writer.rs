//! Cleaned output writer

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::record::Record;

/// Field values of a record in feature order; absent fields become empty strings.
pub fn serialize_record(record: &Record, features: &[String]) -> Vec<String> {
    features
        .iter()
        .map(|name| record.get(name).map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

/// Write the synthesized header followed by one line per record.
///
/// Values are quoted when they contain the delimiter, quotes or newlines.
pub fn write_records<W: Write>(writer: W, features: &[String], records: &[Record]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(features)?;
    for record in records {
        csv_writer.write_record(serialize_record(record, features))?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}

pub fn write_output(path: &Path, features: &[String], records: &[Record]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_records(std::io::BufWriter::new(file), features, records)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))
}
