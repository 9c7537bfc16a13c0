//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sources observation data (CSV, built-in example, or synthetic sample)
//! - runs the fit pipeline
//! - prints matrices/reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DemoArgs, FitArgs, PredictArgs};
use crate::data::{SampleSpec, example_dataset, generate_sample};
use crate::domain::{Dataset, DatasetStats, FitConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ols` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `ols` (and `ols --seed 7`) to behave like `ols demo ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
        Command::Predict(args) => handle_predict(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let ingest = crate::io::ingest::load_dataset(&args.csv, &config)?;

    let warnings = crate::report::format_row_errors(&ingest.row_errors);
    if !warnings.is_empty() {
        eprint!("{warnings}");
    }

    report_run(&ingest.dataset, &ingest.stats, &config)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = demo_config_from_args(&args);

    let dataset = match args.synthetic {
        Some(observations) => generate_sample(&SampleSpec {
            observations,
            num_vars: args.vars,
            seed: args.seed,
            noise_sigma: args.noise,
        })?,
        None => example_dataset(),
    };

    let stats = DatasetStats::from_dataset(&dataset)
        .ok_or_else(|| AppError::new(3, "Demo dataset is empty."))?;

    report_run(&dataset, &stats, &config)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let fit = crate::io::fitfile::read_fit_json(&args.fit)?;
    let predictors = parse_values(&args.at)?;
    let y = fit.model.predict(&predictors)?;

    for (name, value) in fit.model.predictor_names.iter().zip(&predictors) {
        println!("{name} = {value}");
    }
    println!("{} = {y:.6}", fit.response_name);
    Ok(())
}

/// Run the shared pipeline and print/export everything the config asks for.
fn report_run(dataset: &Dataset, stats: &DatasetStats, config: &FitConfig) -> Result<(), AppError> {
    let run = pipeline::run_fit(dataset, config)?;

    if config.show_matrices {
        println!("{}", crate::report::format_design_matrices(&run.x, &run.y));
    }

    println!("{}", crate::report::format_run_summary(stats, &run.fit, config));
    println!("{}", crate::report::format_outlier_table(&run.outliers));

    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.residuals, dataset)?;
    }
    if let Some(path) = &config.export_fit {
        crate::io::fitfile::write_fit_json(path, &run.fit, dataset)?;
    }

    Ok(())
}

fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        response: args.response.clone(),
        singular_tol: args.singular_tol,
        top_n: args.top,
        show_matrices: args.matrices && !args.no_matrices,
        export_results: args.export.clone(),
        export_fit: args.export_fit.clone(),
    }
}

fn demo_config_from_args(args: &DemoArgs) -> FitConfig {
    FitConfig {
        response: None,
        singular_tol: args.singular_tol,
        top_n: args.top,
        show_matrices: args.matrices && !args.no_matrices,
        export_results: args.export.clone(),
        export_fit: args.export_fit.clone(),
    }
}

fn parse_values(raw: &str) -> Result<Vec<f64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| AppError::new(2, format!("Invalid predictor value '{s}'.")))
        })
        .collect()
}

/// Rewrite argv so `ols` defaults to `ols demo`.
///
/// Rules:
/// - `ols`                     -> `ols demo`
/// - `ols --seed 7 ...`        -> `ols demo --seed 7 ...`
/// - `ols --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("demo".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "demo" | "predict");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "demo flags".
    if arg1.starts_with('-') {
        argv.insert(1, "demo".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
