//! Pipeline driver: read, clean, write

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::config::PipelineConfig;
use super::loader::{is_csv_empty, load_records};
use super::metrics::MetricsSink;
use super::stages::TransformChain;
use super::writer::write_output;

/// Result of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Input had no data lines; nothing was written
    Empty,
    Written {
        /// Data lines read from the input
        rows_in: usize,
        /// Records written after filtering
        rows_out: usize,
    },
}

impl PipelineOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, PipelineOutcome::Written { .. })
    }

    pub fn rows_dropped(&self) -> usize {
        match self {
            PipelineOutcome::Empty => 0,
            PipelineOutcome::Written { rows_in, rows_out } => rows_in - rows_out,
        }
    }
}

/// Clean `input` into `output`.
///
/// Empty input (no data lines) short-circuits to `PipelineOutcome::Empty`
/// without running the chain or creating the output. A fatal record error
/// aborts before the output file is created.
pub fn run_pipeline(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    tenure_mean: f64,
    metrics: &dyn MetricsSink,
) -> Result<PipelineOutcome> {
    config.validate()?;

    if is_csv_empty(input)? {
        info!(input = %input.display(), "input is empty or only contains a header");
        return Ok(PipelineOutcome::Empty);
    }

    let loaded = load_records(input, config)?;
    let rows_in = loaded.records.len();
    debug!(offset = loaded.offset, rows = rows_in, "loaded input records");

    let chain = TransformChain::standard(config.clone(), tenure_mean);
    debug!(stages = ?chain.stage_names(), "running transform chain");
    let cleaned = chain
        .run(loaded.records, metrics)
        .with_context(|| format!("Cleaning aborted for {}", input.display()))?;

    let rows_out = write_output(output, &config.features, &cleaned)?;
    info!(rows_in, rows_out, output = %output.display(), "wrote cleaned output");

    Ok(PipelineOutcome::Written { rows_in, rows_out })
}
