//! Built-in data sources: the example dataset and seeded synthetic
//! sample generation.

pub mod sample;

pub use sample::*;
