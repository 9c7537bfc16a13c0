//! Command-line parsing for the QR least-squares fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::math::DEFAULT_SINGULAR_TOL;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ols", version, about = "QR least-squares regression fitter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a linear model to a CSV of observations and print diagnostics.
    Fit(FitArgs),
    /// Fit the built-in example dataset (or a seeded synthetic sample).
    Demo(DemoArgs),
    /// Evaluate a previously exported fit at new predictor values.
    Predict(PredictArgs),
}

/// Options for fitting a CSV file.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Observation CSV. One row per observation; the response column defaults
    /// to `y` (else the last column) and every other column is a predictor.
    pub csv: PathBuf,

    /// Response column name.
    #[arg(long)]
    pub response: Option<String>,

    /// Relative singularity tolerance for back-substitution.
    #[arg(long, default_value_t = DEFAULT_SINGULAR_TOL)]
    pub singular_tol: f64,

    /// Show the top-N observations by absolute residual.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Print the assembled X and y matrices (enabled by default).
    #[arg(long, default_value_t = true)]
    pub matrices: bool,

    /// Suppress the matrix dump.
    #[arg(long)]
    pub no_matrices: bool,

    /// Export per-observation results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fitted model to JSON.
    #[arg(long = "export-fit")]
    pub export_fit: Option<PathBuf>,
}

/// Options for the demo command.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Generate a synthetic sample with N observations instead of using the
    /// built-in example data.
    #[arg(long, value_name = "N")]
    pub synthetic: Option<usize>,

    /// Number of predictors for synthetic samples.
    #[arg(long, default_value_t = 2)]
    pub vars: usize,

    /// Random seed for synthetic samples.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Gaussian noise sigma for synthetic samples.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Relative singularity tolerance for back-substitution.
    #[arg(long, default_value_t = DEFAULT_SINGULAR_TOL)]
    pub singular_tol: f64,

    /// Show the top-N observations by absolute residual.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Print the assembled X and y matrices (enabled by default).
    #[arg(long, default_value_t = true)]
    pub matrices: bool,

    /// Suppress the matrix dump.
    #[arg(long)]
    pub no_matrices: bool,

    /// Export per-observation results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fitted model to JSON.
    #[arg(long = "export-fit")]
    pub export_fit: Option<PathBuf>,
}

/// Options for evaluating a saved fit.
#[derive(Debug, Parser)]
pub struct PredictArgs {
    /// Fit JSON file produced by `ols fit --export-fit`.
    #[arg(long, value_name = "JSON")]
    pub fit: PathBuf,

    /// Comma-separated predictor values, e.g. `--at 3.5,7.2`.
    #[arg(long, value_name = "VALUES")]
    pub at: String,
}
