//! Reporting utilities: residuals, outlier rankings, and formatted output.

pub mod format;

pub use format::*;

use crate::domain::{FitResult, Observation, ObservationResidual};
use crate::error::AppError;

/// Compute fitted values and residuals for each observation.
pub fn compute_residuals(
    observations: &[Observation],
    fit: &FitResult,
) -> Result<Vec<ObservationResidual>, AppError> {
    let mut out = Vec::with_capacity(observations.len());
    for o in observations {
        let y_fit = fit.model.predict(&o.predictors)?;
        if !y_fit.is_finite() {
            return Err(AppError::new(
                4,
                "Non-finite model prediction during residual computation.",
            ));
        }
        let residual = o.response - y_fit;
        out.push(ObservationResidual {
            observation: o.clone(),
            y_fit,
            residual,
        });
    }
    Ok(out)
}

/// Rank the top-N observations by absolute residual (worst fits first).
pub fn rank_outliers(residuals: &[ObservationResidual], top_n: usize) -> Vec<ObservationResidual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.into_iter().take(top_n).collect()
}
