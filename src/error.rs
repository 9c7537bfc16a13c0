//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`] is the typed error of the numeric core (design matrix
//!   assembly and the QR solver). Callers can match on the exact condition.
//! - [`AppError`] is the process-level error carrying an exit code and a
//!   human-readable message. Everything above the numeric core reports it.
//!
//! Exit code conventions:
//!
//! - 2: input/usage errors (bad files, bad shapes, bad flags)
//! - 3: empty dataset (nothing to fit)
//! - 4: numerical failure (singular or otherwise unsolvable system)

/// Errors produced by the numeric core.
///
/// All variants are unrecoverable for a given input: the core never retries
/// or approximates, and no partial result is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Input data dimensions disagree with the declared counts.
    ShapeMismatch { context: String },
    /// X and y row counts disagree, or X has more columns than rows.
    DimensionMismatch { context: String },
    /// R has a zero (or numerically negligible) diagonal entry, so the
    /// back-substitution would divide by ~0.
    SingularSystem { index: usize, diagonal: f64 },
}

impl FitError {
    pub fn shape(context: impl Into<String>) -> Self {
        FitError::ShapeMismatch {
            context: context.into(),
        }
    }

    pub fn dimension(context: impl Into<String>) -> Self {
        FitError::DimensionMismatch {
            context: context.into(),
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::ShapeMismatch { context } => write!(f, "Shape mismatch: {context}"),
            FitError::DimensionMismatch { context } => {
                write!(f, "Dimension mismatch: {context}")
            }
            FitError::SingularSystem { index, diagonal } => write!(
                f,
                "Singular system: R[{index}][{index}] = {diagonal:e} is zero or negligible."
            ),
        }
    }
}

impl std::error::Error for FitError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::ShapeMismatch { .. } | FitError::DimensionMismatch { .. } => 2,
            FitError::SingularSystem { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        let shape: AppError = FitError::shape("row 0 has 3 values, expected 2").into();
        assert_eq!(shape.exit_code(), 2);

        let dim: AppError = FitError::dimension("X has 5 columns but only 3 rows").into();
        assert_eq!(dim.exit_code(), 2);

        let singular: AppError = FitError::SingularSystem {
            index: 1,
            diagonal: 0.0,
        }
        .into();
        assert_eq!(singular.exit_code(), 4);
    }
}
