//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and normalized observation data (`Observation`, `Dataset`)
//! - run configuration (`FitConfig`)
//! - fit outputs (`FitResult`, `LinearModel`, `FitQuality`, etc.)

pub mod types;

pub use types::*;
