//! Fit orchestration.
//!
//! Responsibilities:
//!
//! - turn a `Dataset` into the `(X, y)` regression system
//! - run the QR least-squares solve
//! - derive fit quality diagnostics (SSE, RMSE, R^2)

pub mod fitter;

pub use fitter::*;
