//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for prediction

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// A single regression observation: one predictor row plus its response.
#[derive(Debug, Clone)]
pub struct Observation {
    pub id: String,
    /// Predictor values in column order (the intercept is *not* stored here;
    /// the design matrix builder prepends it).
    pub predictors: Vec<f64>,
    /// Observed response value.
    pub response: f64,
}

/// A normalized set of observations ready for fitting.
///
/// Invariant: every observation has exactly `predictor_names.len()` predictor
/// values. Ingest and the sample generators uphold this; the design matrix
/// builder re-checks it and reports `ShapeMismatch` otherwise.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub predictor_names: Vec<String>,
    pub response_name: String,
    pub observations: Vec<Observation>,
}

impl Dataset {
    /// Number of predictors (excluding the intercept).
    pub fn num_vars(&self) -> usize {
        self.predictor_names.len()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Predictor rows as plain vectors, in observation order.
    pub fn predictor_rows(&self) -> Vec<Vec<f64>> {
        self.observations
            .iter()
            .map(|o| o.predictors.clone())
            .collect()
    }

    /// Response values in observation order.
    pub fn responses(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.response).collect()
    }
}

/// Summary stats about the observations actually used for fitting.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_obs: usize,
    pub num_vars: usize,
    pub response_min: f64,
    pub response_max: f64,
}

impl DatasetStats {
    /// Compute stats, or `None` when the dataset is empty or non-finite.
    pub fn from_dataset(dataset: &Dataset) -> Option<DatasetStats> {
        let mut response_min = f64::INFINITY;
        let mut response_max = f64::NEG_INFINITY;

        for o in &dataset.observations {
            response_min = response_min.min(o.response);
            response_max = response_max.max(o.response);
        }

        if !response_min.is_finite() || !response_max.is_finite() {
            return None;
        }

        Some(DatasetStats {
            n_obs: dataset.len(),
            num_vars: dataset.num_vars(),
            response_min,
            response_max,
        })
    }
}

/// Fitted linear model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub predictor_names: Vec<String>,
    /// `coefficients[0]` is the intercept; `coefficients[j]` for `j >= 1` is
    /// the slope of predictor `j - 1`, in `predictor_names` order.
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    pub fn slopes(&self) -> &[f64] {
        &self.coefficients[1..]
    }

    /// Evaluate the model at one predictor row.
    pub fn predict(&self, predictors: &[f64]) -> Result<f64, FitError> {
        let expected = self.coefficients.len().saturating_sub(1);
        if predictors.len() != expected {
            return Err(FitError::shape(format!(
                "Model has {expected} predictor(s), got {} value(s).",
                predictors.len()
            )));
        }
        let mut y = self.coefficients[0];
        for (c, x) in self.coefficients[1..].iter().zip(predictors) {
            y += c * x;
        }
        Ok(y)
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub r_squared: f64,
    pub n: usize,
}

/// Fit output: model parameters plus quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub model: LinearModel,
    pub quality: FitQuality,
}

/// A per-observation fitted result (used for outlier ranking and exports).
#[derive(Debug, Clone)]
pub struct ObservationResidual {
    pub observation: Observation,
    pub y_fit: f64,
    pub residual: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Response column name; `None` means `y` if present, else the last column.
    pub response: Option<String>,
    /// Relative tolerance for the singularity guard in back-substitution.
    pub singular_tol: f64,
    /// Number of largest-|residual| observations to report.
    pub top_n: usize,
    /// Print the assembled `X` and `y` matrices.
    pub show_matrices: bool,

    pub export_results: Option<PathBuf>,
    pub export_fit: Option<PathBuf>,
}

/// A saved fit file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub created: NaiveDate,
    pub response_name: String,
    pub model: LinearModel,
    pub quality: FitQuality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_evaluates_intercept_plus_slopes() {
        let model = LinearModel {
            predictor_names: vec!["x1".to_string(), "x2".to_string()],
            coefficients: vec![1.0, 2.0, 3.0],
        };
        let y = model.predict(&[10.0, 100.0]).unwrap();
        assert!((y - 321.0).abs() < 1e-12);
    }

    #[test]
    fn predict_rejects_wrong_arity() {
        let model = LinearModel {
            predictor_names: vec!["x1".to_string()],
            coefficients: vec![0.5, 2.0],
        };
        let err = model.predict(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, FitError::ShapeMismatch { .. }));
    }

    #[test]
    fn stats_cover_response_range() {
        let dataset = Dataset {
            predictor_names: vec!["x1".to_string()],
            response_name: "y".to_string(),
            observations: vec![
                Observation {
                    id: "a".to_string(),
                    predictors: vec![1.0],
                    response: -2.0,
                },
                Observation {
                    id: "b".to_string(),
                    predictors: vec![2.0],
                    response: 7.0,
                },
            ],
        };
        let stats = DatasetStats::from_dataset(&dataset).unwrap();
        assert_eq!(stats.n_obs, 2);
        assert_eq!(stats.num_vars, 1);
        assert!((stats.response_min + 2.0).abs() < 1e-12);
        assert!((stats.response_max - 7.0).abs() < 1e-12);
    }
}
