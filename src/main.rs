//! churnprep: Churn Record Cleaning CLI Tool
//!
//! Cleans a raw churn CSV into model-ready features and optionally scores
//! the result with a pre-trained random forest.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use churnprep::cli::{confirm_overwrite, Cli, Commands};
use churnprep::model::{print_scoring_report, score_file, RandomForestModel};
use churnprep::pipeline::{
    is_csv_empty, reference_column_mean, run_pipeline, CleaningCounters, PipelineConfig,
    PipelineOutcome,
};
use churnprep::report::{export_run_report, CleaningSummary, RunPaths, RunReport};
use churnprep::utils::{
    create_spinner, finish_with_success, init_tracing, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Score {
                model,
                data,
                config,
            } => run_score(model, data, config.as_deref()),
        };
    }

    // Main cleaning pipeline - require input and reference
    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let reference = cli.reference.as_ref().ok_or_else(|| {
        anyhow::anyhow!("Reference dataset is required. Use -r/--reference to specify a file.")
    })?;
    let output_path = cli
        .output_path()
        .ok_or_else(|| anyhow::anyhow!("Could not derive an output path"))?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(policy) = cli.empty_tenure {
        config = config.with_empty_tenure_policy(policy);
    }

    if output_path.exists() && !cli.no_confirm && !confirm_overwrite(&output_path)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    if is_csv_empty(input)? {
        print_warning(&format!(
            "{} is empty or only contains a header.",
            input.display()
        ));
        return Ok(());
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        input,
        reference,
        &output_path,
        cli.model.as_deref(),
        &config.empty_tenure_policy.to_string(),
    );

    // Step 1: Reference statistics
    print_step_header(1, "Reference Statistics");
    let step_start = Instant::now();
    let spinner = create_spinner("Computing reference tenure mean...");
    let tenure_mean = reference_column_mean(reference, &config.tenure_column)?;
    finish_with_success(&spinner, &format!("Tenure mean: {:.4}", tenure_mean));
    let reference_elapsed = step_start.elapsed();
    print_step_time(reference_elapsed);

    // Step 2: Clean
    print_step_header(2, "Clean Records");
    let step_start = Instant::now();
    let counters = CleaningCounters::new();
    let outcome = run_pipeline(input, &output_path, &config, tenure_mean, &counters)?;

    let (rows_in, rows_out) = match outcome {
        PipelineOutcome::Empty => {
            print_warning(&format!(
                "{} is empty or only contains a header.",
                input.display()
            ));
            return Ok(());
        }
        PipelineOutcome::Written { rows_in, rows_out } => (rows_in, rows_out),
    };
    print_info(&format!("{} contains data.", input.display()));

    let counts = counters.snapshot();
    if counts.invalid_contract_rows > 0 {
        print_count(
            "record(s) with an invalid contract",
            counts.invalid_contract_rows,
            Some("(dropped)"),
        );
    }
    if counts.total_imputations() > 0 {
        print_count("imputed value(s)", counts.total_imputations(), None);
    }
    print_success(&format!("Saved to {}", output_path.display()));
    let clean_elapsed = step_start.elapsed();
    print_step_time(clean_elapsed);

    let mut summary = CleaningSummary::new(rows_in, rows_out, counts, tenure_mean);
    summary.set_reference_time(reference_elapsed);
    summary.set_clean_time(clean_elapsed);

    // Step 3: Score with the pre-trained model
    let mut predictions = None;
    if let Some(model_path) = &cli.model {
        print_step_header(3, "Score Output");
        let step_start = Instant::now();
        let model = RandomForestModel::from_json_file(model_path)?;
        print_success("The model was loaded successfully and is a random forest.");

        let scoring = score_file(&model, &output_path, &config.features)?;
        print_scoring_report(&scoring);
        predictions = Some(scoring.predictions);

        let scoring_elapsed = step_start.elapsed();
        summary.set_scoring_time(scoring_elapsed);
        print_step_time(scoring_elapsed);
    }

    summary.display();

    if let Some(report_path) = &cli.report {
        let mut report = RunReport::new(
            RunPaths {
                input,
                output: &output_path,
                reference,
            },
            config.empty_tenure_policy,
            &config.features,
            &summary,
        );
        if let Some(predictions) = predictions {
            report = report.with_predictions(predictions);
        }
        export_run_report(&report, report_path)?;
        print_success(&format!("Run report written to {}", report_path.display()));
    }

    print_completion();

    Ok(())
}

/// Score an existing cleaned file
fn run_score(model_path: &Path, data: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let model = RandomForestModel::from_json_file(model_path)?;
    print_success("The model was loaded successfully and is a random forest.");

    let scoring = score_file(&model, data, &config.features)?;
    print_scoring_report(&scoring);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_json_file(path),
        None => Ok(PipelineConfig::default()),
    }
}
