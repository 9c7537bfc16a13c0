//! Sample datasets for the `demo` command and tests.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Dataset, Observation};
use crate::error::AppError;

/// The classic two-predictor example dataset.
///
/// Four observations, two predictors; small enough to verify the assembled
/// matrices by eye.
pub fn example_dataset() -> Dataset {
    let rows: [([f64; 2], f64); 4] = [
        ([1.0, 2.0], 5.0),
        ([2.0, 3.0], 8.0),
        ([3.0, 3.0], 8.0),
        ([4.0, 8.0], 20.0),
    ];

    Dataset {
        predictor_names: vec!["x1".to_string(), "x2".to_string()],
        response_name: "y".to_string(),
        observations: rows
            .iter()
            .enumerate()
            .map(|(i, (predictors, response))| Observation {
                id: format!("obs{}", i + 1),
                predictors: predictors.to_vec(),
                response: *response,
            })
            .collect(),
    }
}

/// Parameters for synthetic sample generation.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub observations: usize,
    pub num_vars: usize,
    /// Seed for the RNG; identical specs produce identical datasets.
    pub seed: u64,
    /// Standard deviation of the Gaussian noise added to each response.
    pub noise_sigma: f64,
}

/// Generate a synthetic linear dataset `y = c0 + sum_j c_j x_j + noise`.
///
/// The true coefficients and predictor values are drawn from the seeded RNG,
/// so a run is reproducible given `(observations, num_vars, seed, noise_sigma)`.
pub fn generate_sample(spec: &SampleSpec) -> Result<Dataset, AppError> {
    if spec.observations == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if spec.observations < spec.num_vars + 1 {
        return Err(AppError::new(
            2,
            format!(
                "Need at least {} observation(s) for {} predictor(s) plus the intercept.",
                spec.num_vars + 1,
                spec.num_vars
            ),
        ));
    }
    if !spec.noise_sigma.is_finite() || spec.noise_sigma < 0.0 {
        return Err(AppError::new(2, "Noise sigma must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    // True coefficients, intercept first.
    let true_coefficients: Vec<f64> = (0..=spec.num_vars)
        .map(|_| rng.gen_range(-5.0..=5.0))
        .collect();

    let mut observations = Vec::with_capacity(spec.observations);
    for i in 0..spec.observations {
        let predictors: Vec<f64> = (0..spec.num_vars)
            .map(|_| rng.gen_range(-10.0..=10.0))
            .collect();

        let mut response = true_coefficients[0];
        for (c, x) in true_coefficients[1..].iter().zip(&predictors) {
            response += c * x;
        }
        if spec.noise_sigma > 0.0 {
            response += spec.noise_sigma * normal.sample(&mut rng);
        }

        observations.push(Observation {
            id: format!("obs{}", i + 1),
            predictors,
            response,
        });
    }

    Ok(Dataset {
        predictor_names: (1..=spec.num_vars).map(|j| format!("x{j}")).collect(),
        response_name: "y".to_string(),
        observations,
    })
}
