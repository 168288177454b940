//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::EmptyTenurePolicy;

/// churnprep - Clean churn records into model-ready features and score them
#[derive(Parser, Debug)]
#[command(name = "churnprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input CSV file to clean
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Reference CSV used to compute the tenure imputation mean
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Output CSV path.
    /// Defaults to input directory with '_processed' suffix (e.g., data.csv → data_processed.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file overriding the default telco schema and imputation defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pre-trained random forest (JSON) used to score the cleaned output
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// How to fill a tenure cell that is an empty string.
    /// Overrides the value from --config when given.
    #[arg(long, value_enum)]
    pub empty_tenure: Option<EmptyTenurePolicy>,

    /// Write a JSON run report (counts, timings, predictions) to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an already cleaned CSV file with a pre-trained forest
    Score {
        /// Model file (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Cleaned CSV file
        data: PathBuf,

        /// JSON config whose feature list orders the columns when the model has none
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Get the input path, if one was given.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the output path, deriving from input if not explicitly provided.
    /// The derived path will be in the same directory as the input with a '_processed' suffix.
    pub fn output_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(self.output.clone().unwrap_or_else(|| {
            let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_processed.csv", stem))
        }))
    }
}
