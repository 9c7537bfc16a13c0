//! Mathematical core: design matrix assembly and the QR least-squares solver.

pub mod design;
pub mod qr;

pub use design::*;
pub use qr::*;
