//! Export per-observation results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Dataset, ObservationResidual};
use crate::error::AppError;

/// Write per-observation results to a CSV file.
pub fn write_results_csv(
    path: &Path,
    residuals: &[ObservationResidual],
    dataset: &Dataset,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    let mut header = String::from("id");
    for name in &dataset.predictor_names {
        header.push(',');
        header.push_str(name);
    }
    header.push_str(&format!(",{},y_fit,residual", dataset.response_name));
    writeln!(file, "{header}")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in residuals {
        let o = &r.observation;
        let mut line = o.id.clone();
        for v in &o.predictors {
            line.push_str(&format!(",{v:.10}"));
        }
        line.push_str(&format!(",{:.10},{:.10},{:.10}", o.response, r.y_fit, r.residual));
        writeln!(file, "{line}")
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
