//! Read/write fit JSON files.
//!
//! Fit JSON is the "portable" representation of a fitted model:
//! - coefficients + predictor names
//! - quality diagnostics (SSE/RMSE/R^2)
//! - run metadata (tool name, creation date, response column)
//!
//! The schema is defined by `domain::FitFile`; `ols predict` reloads it.

use std::fs::File;
use std::path::Path;

use crate::domain::{Dataset, FitFile, FitResult};
use crate::error::AppError;

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, fit: &FitResult, dataset: &Dataset) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create fit JSON '{}': {e}", path.display()))
    })?;

    let out = FitFile {
        tool: "ols".to_string(),
        created: chrono::Utc::now().date_naive(),
        response_name: dataset.response_name.clone(),
        model: fit.model.clone(),
        quality: fit.quality.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;

    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open fit JSON '{}': {e}", path.display()))
    })?;
    let fit: FitFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid fit JSON: {e}")))?;
    Ok(fit)
}
