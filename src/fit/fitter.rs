//! OLS fitting for a normalized dataset.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Dataset, FitQuality, FitResult, LinearModel};
use crate::error::AppError;
use crate::math::{build_design_matrix, solve_least_squares_with_tol};

/// A solved regression system.
///
/// Keeps `X` and `y` alongside the fit so front-ends can display the
/// assembled matrices without rebuilding them.
#[derive(Debug, Clone)]
pub struct FittedSystem {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    pub fit: FitResult,
}

/// Fit an OLS model to the dataset.
pub fn fit_dataset(dataset: &Dataset, singular_tol: f64) -> Result<FittedSystem, AppError> {
    if dataset.is_empty() {
        return Err(AppError::new(3, "No observations to fit."));
    }

    // Extract raw arrays once; the builder re-validates row shapes.
    let predictor_rows = dataset.predictor_rows();
    let responses = dataset.responses();

    let (x, y) = build_design_matrix(
        dataset.len(),
        dataset.num_vars(),
        &predictor_rows,
        &responses,
    )?;

    let coefficients = solve_least_squares_with_tol(&x, &y, singular_tol)?;
    let quality = compute_quality(&x, &y, &coefficients);

    let model = LinearModel {
        predictor_names: dataset.predictor_names.clone(),
        coefficients: coefficients.iter().copied().collect(),
    };

    Ok(FittedSystem {
        x,
        y,
        fit: FitResult { model, quality },
    })
}

fn compute_quality(x: &DMatrix<f64>, y: &DVector<f64>, c: &DVector<f64>) -> FitQuality {
    let n = y.nrows();
    let fitted = x * c;
    let residual = y - fitted;
    let sse = residual.norm_squared();
    let rmse = (sse / n as f64).sqrt();

    let mean = y.mean();
    let sst: f64 = y.iter().map(|v| (v - mean) * (v - mean)).sum();
    // A constant response has no variance to explain; report R^2 = 1 when the
    // fit reproduces it and 0 otherwise.
    let r_squared = if sst > 0.0 {
        1.0 - sse / sst
    } else if sse <= f64::EPSILON {
        1.0
    } else {
        0.0
    };

    FitQuality {
        sse,
        rmse,
        r_squared,
        n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::example_dataset;
    use crate::domain::Observation;

    fn dataset_from_rows(rows: &[(Vec<f64>, f64)], names: &[&str]) -> Dataset {
        Dataset {
            predictor_names: names.iter().map(|s| s.to_string()).collect(),
            response_name: "y".to_string(),
            observations: rows
                .iter()
                .enumerate()
                .map(|(i, (predictors, response))| Observation {
                    id: format!("obs{}", i + 1),
                    predictors: predictors.clone(),
                    response: *response,
                })
                .collect(),
        }
    }

    #[test]
    fn fits_example_dataset() {
        let fitted = fit_dataset(&example_dataset(), 1e-12).unwrap();
        let c = &fitted.fit.model.coefficients;

        assert_eq!(c.len(), 3);
        assert!((c[0] - 19.0 / 116.0).abs() < 1e-9);
        assert!((c[1] - 9.0 / 29.0).abs() < 1e-9);
        assert!((c[2] - 135.0 / 58.0).abs() < 1e-9);

        let q = &fitted.fit.quality;
        assert_eq!(q.n, 4);
        assert!(q.sse.is_finite() && q.sse >= 0.0);
        assert!(q.rmse.is_finite());
        assert!(q.r_squared > 0.9 && q.r_squared <= 1.0);
    }

    #[test]
    fn exact_line_has_unit_r_squared() {
        // y = 2 + 3x with no noise.
        let rows: Vec<(Vec<f64>, f64)> = (0..5)
            .map(|i| {
                let x = i as f64;
                (vec![x], 2.0 + 3.0 * x)
            })
            .collect();
        let fitted = fit_dataset(&dataset_from_rows(&rows, &["x1"]), 1e-12).unwrap();

        let c = &fitted.fit.model.coefficients;
        assert!((c[0] - 2.0).abs() < 1e-9);
        assert!((c[1] - 3.0).abs() < 1e-9);
        assert!(fitted.fit.quality.rmse < 1e-9);
        assert!((fitted.fit.quality.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_predictors_fail_with_exit_code_4() {
        let rows: Vec<(Vec<f64>, f64)> = (0..4)
            .map(|i| {
                let x = i as f64;
                (vec![x, 2.0 * x], x)
            })
            .collect();
        let err = fit_dataset(&dataset_from_rows(&rows, &["x1", "x2"]), 1e-12).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn empty_dataset_fails_with_exit_code_3() {
        let dataset = dataset_from_rows(&[], &["x1"]);
        let err = fit_dataset(&dataset, 1e-12).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn too_few_observations_fail_with_exit_code_2() {
        let rows = vec![(vec![1.0, 2.0], 3.0)];
        let err = fit_dataset(&dataset_from_rows(&rows, &["x1", "x2"]), 1e-12).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
