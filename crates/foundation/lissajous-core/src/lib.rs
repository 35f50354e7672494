//! # Lissajous Core
//!
//! Parameters and point generation for 3D Lissajous knots.
//!
//! ```text
//! x = sin(n_x·t + φ1)
//! y = sin(n_y·t + φ2)
//! z = sin(n_z·t)          t ∈ [-π, π]
//! ```
//!
//! The knot closes when the frequency ratios are rational. Everything in
//! this crate is a pure function of a [`ParameterSet`]; nothing is cached
//! between calls.

pub mod curve;
pub mod params;

pub use curve::{evaluate, generate, sample_times, Axis, Point3, PointSequence, Shadows, DEFAULT_SHADOW_OFFSET};
pub use params::{Basis, Frequencies, ParameterSet, MAX_FREQUENCY, MAX_SAMPLES, MIN_SAMPLES};

/// Result type for lissajous-core operations
pub type Result<T> = std::result::Result<T, KnotError>;

/// Errors raised when a parameter set is checked strictly
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnotError {
    #[error("Frequency for axis {axis} is not finite: {value}")]
    NonFiniteFrequency { axis: char, value: f64 },

    #[error("Frequency for axis {axis} is {value}, magnitude must not exceed {max}")]
    FrequencyOutOfRange { axis: char, value: f64, max: f64 },

    #[error("Phase is not finite: {0}")]
    NonFinitePhase(f64),

    #[error("Sample count must be at least {min}, got {got}")]
    EmptySampleCount { min: usize, got: usize },

    #[error("Sample count {got} exceeds the maximum of {max}")]
    TooManySamples { max: usize, got: usize },

    #[error("Unknown basis: {0}")]
    UnknownBasis(String),
}
