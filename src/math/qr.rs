//! QR least-squares solver.
//!
//! Solves `min ||X c - y||_2` for a tall, full-column-rank `X`:
//!
//! 1. factorize `X = Q R` (Householder QR; `Q` has orthonormal columns,
//!    `R` is `n x n` upper triangular in the thin form)
//! 2. project the response: `qty = Q^T y`
//! 3. back-substitute `R c = qty` from the last row upward
//!
//! The back-substitution order matters: row `i` uses the already-solved
//! `c[i+1..n]`, subtracts the correction sum, and only then divides by the
//! diagonal. A zero (or negligible) diagonal means the system is
//! rank-deficient, which we surface as `SingularSystem` instead of letting a
//! division produce inf/NaN coefficients.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Default relative singularity tolerance.
///
/// A diagonal entry of `R` is treated as zero when its magnitude is at or
/// below `tol * max_i |R[i][i]|`.
pub const DEFAULT_SINGULAR_TOL: f64 = 1e-12;

/// Solve a least-squares problem with the default singularity tolerance.
pub fn solve_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
) -> Result<DVector<f64>, FitError> {
    solve_least_squares_with_tol(x, y, DEFAULT_SINGULAR_TOL)
}

/// Solve a least-squares problem with an explicit singularity tolerance.
pub fn solve_least_squares_with_tol(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    singular_tol: f64,
) -> Result<DVector<f64>, FitError> {
    let (m, n) = x.shape();
    if y.nrows() != m {
        return Err(FitError::dimension(format!(
            "X has {m} row(s) but y has {}.",
            y.nrows()
        )));
    }
    if n > m {
        return Err(FitError::dimension(format!(
            "X has {n} column(s) but only {m} row(s); the system is under-determined."
        )));
    }

    let qr = x.clone().qr();
    let q = qr.q();
    let r = qr.r();

    // n x 1 projection of y onto the column-space basis.
    let qty = q.transpose() * y;

    back_substitute(&r, &qty, singular_tol)
}

/// Solve the upper-triangular system `R c = qty`.
fn back_substitute(
    r: &DMatrix<f64>,
    qty: &DVector<f64>,
    singular_tol: f64,
) -> Result<DVector<f64>, FitError> {
    let n = r.ncols();

    // The tolerance is relative to the largest diagonal magnitude, so the
    // check is invariant under uniform scaling of X.
    let scale = (0..n).map(|i| r[(i, i)].abs()).fold(0.0_f64, f64::max);
    let threshold = singular_tol.max(0.0) * scale;

    let mut c = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut value = qty[i];
        for j in (i + 1)..n {
            value -= c[j] * r[(i, j)];
        }
        let diagonal = r[(i, i)];
        if !diagonal.is_finite() || diagonal.abs() <= threshold {
            return Err(FitError::SingularSystem { index: i, diagonal });
        }
        c[i] = value / diagonal;
    }

    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_system() -> (DMatrix<f64>, DVector<f64>) {
        let x = DMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 1.0, 2.0, //
                1.0, 2.0, 3.0, //
                1.0, 3.0, 3.0, //
                1.0, 4.0, 8.0,
            ],
        );
        let y = DVector::from_row_slice(&[5.0, 8.0, 8.0, 20.0]);
        (x, y)
    }

    #[test]
    fn solves_example_system() {
        let (x, y) = example_system();
        let c = solve_least_squares(&x, &y).unwrap();

        // Exact normal-equation solution: (19/116, 9/29, 135/58).
        assert_eq!(c.nrows(), 3);
        assert!((c[0] - 19.0 / 116.0).abs() < 1e-9);
        assert!((c[1] - 9.0 / 29.0).abs() < 1e-9);
        assert!((c[2] - 135.0 / 58.0).abs() < 1e-9);
    }

    #[test]
    fn residual_is_orthogonal_to_columns() {
        let (x, y) = example_system();
        let c = solve_least_squares(&x, &y).unwrap();

        let residual = &y - &x * &c;
        let projections = x.transpose() * residual;
        for v in projections.iter() {
            assert!(v.abs() < 1e-9, "residual not orthogonal: {v}");
        }
    }

    #[test]
    fn repeated_solves_are_identical() {
        let (x, y) = example_system();
        let a = solve_least_squares(&x, &y).unwrap();
        let b = solve_least_squares(&x, &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn solves_square_system_exactly() {
        // y = 1 + 2x on x = [0, 1]; square full-rank system has zero residual.
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 3.0]);
        let c = solve_least_squares(&x, &y).unwrap();
        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn back_substitution_solves_triangular_system() {
        let r = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 0.0, 4.0]);
        let qty = DVector::from_row_slice(&[4.0, 8.0]);
        let c = back_substitute(&r, &qty, DEFAULT_SINGULAR_TOL).unwrap();
        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mismatched_rows_is_dimension_mismatch() {
        let (x, _) = example_system();
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        let err = solve_least_squares(&x, &y).unwrap_err();
        assert!(matches!(err, FitError::DimensionMismatch { .. }));
    }

    #[test]
    fn under_determined_system_is_dimension_mismatch() {
        let x = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        let err = solve_least_squares(&x, &y).unwrap_err();
        assert!(matches!(err, FitError::DimensionMismatch { .. }));
    }

    #[test]
    fn duplicate_column_is_singular() {
        // Second and third columns are identical, so R's last diagonal is ~0.
        let x = DMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 2.0, 2.0, //
                1.0, 3.0, 3.0, //
                1.0, 5.0, 5.0, //
                1.0, 7.0, 7.0,
            ],
        );
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0]);
        let err = solve_least_squares(&x, &y).unwrap_err();
        assert!(matches!(err, FitError::SingularSystem { .. }));
    }

    #[test]
    fn zero_matrix_is_singular() {
        let x = DMatrix::<f64>::zeros(3, 2);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let err = solve_least_squares(&x, &y).unwrap_err();
        assert!(matches!(err, FitError::SingularSystem { .. }));
    }
}
