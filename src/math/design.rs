//! Design matrix assembly.
//!
//! Builds the regression system `(X, y)` from raw observation data:
//!
//! - `X` is `observations x (num_vars + 1)`, with column 0 fixed to 1.0 for
//!   the intercept and column `j` (`j >= 1`) holding predictor `j - 1`.
//! - `y` copies the response sequence verbatim.
//!
//! This is a pure transformation; all validation failures are reported as
//! `ShapeMismatch` and nothing is partially built.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Assemble the design matrix `X` and response vector `y`.
pub fn build_design_matrix(
    observations: usize,
    num_vars: usize,
    predictor_rows: &[Vec<f64>],
    responses: &[f64],
) -> Result<(DMatrix<f64>, DVector<f64>), FitError> {
    if predictor_rows.len() != observations {
        return Err(FitError::shape(format!(
            "Expected {observations} predictor row(s), got {}.",
            predictor_rows.len()
        )));
    }
    if responses.len() != observations {
        return Err(FitError::shape(format!(
            "Expected {observations} response(s), got {}.",
            responses.len()
        )));
    }

    let mut x = DMatrix::<f64>::zeros(observations, num_vars + 1);
    let mut y = DVector::<f64>::zeros(observations);

    for (i, row) in predictor_rows.iter().enumerate() {
        if row.len() != num_vars {
            return Err(FitError::shape(format!(
                "Predictor row {i} has {} value(s), expected {num_vars}.",
                row.len()
            )));
        }
        x[(i, 0)] = 1.0;
        for (j, &value) in row.iter().enumerate() {
            x[(i, j + 1)] = value;
        }
        y[i] = responses[i];
    }

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_example_system() {
        let rows = vec![
            vec![1.0, 2.0],
            vec![2.0, 3.0],
            vec![3.0, 3.0],
            vec![4.0, 8.0],
        ];
        let responses = [5.0, 8.0, 8.0, 20.0];

        let (x, y) = build_design_matrix(4, 2, &rows, &responses).unwrap();

        assert_eq!(x.shape(), (4, 3));
        assert_eq!(y.nrows(), 4);

        let expected_x = [
            [1.0, 1.0, 2.0],
            [1.0, 2.0, 3.0],
            [1.0, 3.0, 3.0],
            [1.0, 4.0, 8.0],
        ];
        for i in 0..4 {
            for j in 0..3 {
                assert_eq!(x[(i, j)], expected_x[i][j]);
            }
            assert_eq!(y[i], responses[i]);
        }
    }

    #[test]
    fn intercept_column_is_exactly_one() {
        let rows = vec![vec![-3.5], vec![0.0], vec![1e9]];
        let responses = [1.0, 2.0, 3.0];
        let (x, _) = build_design_matrix(3, 1, &rows, &responses).unwrap();
        for i in 0..3 {
            assert_eq!(x[(i, 0)], 1.0);
        }
    }

    #[test]
    fn intercept_only_system_is_valid() {
        let rows = vec![vec![], vec![]];
        let responses = [4.0, 6.0];
        let (x, y) = build_design_matrix(2, 0, &rows, &responses).unwrap();
        assert_eq!(x.shape(), (2, 1));
        assert_eq!(y.nrows(), 2);
    }

    #[test]
    fn wrong_row_length_is_shape_mismatch() {
        let rows = vec![vec![1.0, 2.0], vec![1.0]];
        let responses = [1.0, 2.0];
        let err = build_design_matrix(2, 2, &rows, &responses).unwrap_err();
        assert!(matches!(err, FitError::ShapeMismatch { .. }));
    }

    #[test]
    fn wrong_response_length_is_shape_mismatch() {
        let rows = vec![vec![1.0], vec![2.0]];
        let responses = [1.0];
        let err = build_design_matrix(2, 1, &rows, &responses).unwrap_err();
        assert!(matches!(err, FitError::ShapeMismatch { .. }));
    }

    #[test]
    fn wrong_row_count_is_shape_mismatch() {
        let rows = vec![vec![1.0]];
        let responses = [1.0, 2.0];
        let err = build_design_matrix(2, 1, &rows, &responses).unwrap_err();
        assert!(matches!(err, FitError::ShapeMismatch { .. }));
    }
}
