//! Shared "fit pipeline" logic used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> design matrix -> QR solve -> residuals -> outlier ranking
//!
//! The `fit` and `demo` commands can then focus on sourcing data and printing.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Dataset, FitConfig, FitResult, ObservationResidual};
use crate::error::AppError;
use crate::fit::fit_dataset;

/// All computed outputs of a single fit run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    pub fit: FitResult,
    pub residuals: Vec<ObservationResidual>,
    pub outliers: Vec<ObservationResidual>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(dataset: &Dataset, config: &FitConfig) -> Result<RunOutput, AppError> {
    let fitted = fit_dataset(dataset, config.singular_tol)?;

    let residuals = crate::report::compute_residuals(&dataset.observations, &fitted.fit)?;
    let outliers = crate::report::rank_outliers(&residuals, config.top_n);

    Ok(RunOutput {
        x: fitted.x,
        y: fitted.y,
        fit: fitted.fit,
        residuals,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::example_dataset;

    #[test]
    fn pipeline_produces_consistent_outputs() {
        let config = FitConfig {
            response: None,
            singular_tol: 1e-12,
            top_n: 2,
            show_matrices: true,
            export_results: None,
            export_fit: None,
        };
        let run = run_fit(&example_dataset(), &config).unwrap();

        assert_eq!(run.x.shape(), (4, 3));
        assert_eq!(run.y.nrows(), 4);
        assert_eq!(run.residuals.len(), 4);
        assert_eq!(run.outliers.len(), 2);
        // Residuals must match X*c - y up to sign convention.
        let predicted = &run.x * DVector::from_vec(run.fit.model.coefficients.clone());
        for (i, r) in run.residuals.iter().enumerate() {
            assert!((r.residual - (run.y[i] - predicted[i])).abs() < 1e-9);
        }
    }
}
