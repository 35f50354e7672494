//! Parameter Set for a Lissajous knot
//!
//! Two ways in: [`ParameterSet::validate`] rejects bad values with a
//! [`KnotError`], [`ParameterSet::sanitized`] clamps or replaces them.
//! UI paths use the lenient one so a stray slider value never crashes
//! the viewer.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{KnotError, Result};

/// Fewest points that still draw a segment
pub const MIN_SAMPLES: usize = 2;

/// Upper bound that keeps a render interactive
pub const MAX_SAMPLES: usize = 10_000;

/// Largest accepted frequency magnitude. Keeps `n·t` finite and well
/// above anything the sample count can resolve.
pub const MAX_FREQUENCY: f64 = 1_000.0;

/// Per-axis frequencies (A, B, C)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequencies {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Frequencies {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components paired with their axis label
    pub fn labelled(&self) -> [(char, f64); 3] {
        [('x', self.x), ('y', self.y), ('z', self.z)]
    }

    /// True when every frequency is a whole number, so the curve closes
    /// over `t ∈ [-π, π]`.
    pub fn is_integral(&self) -> bool {
        self.labelled()
            .iter()
            .all(|(_, v)| v.is_finite() && v.fract() == 0.0)
    }
}

impl Default for Frequencies {
    fn default() -> Self {
        Self::new(3.0, 4.0, 2.0)
    }
}

/// Periodic function applied to every axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// `sin(n·t + φ)`
    #[default]
    Sine,
    /// `cos(n·t + φ)`, the form used by Bogle, Hearst, Jones and Stoilov
    Cosine,
}

impl Basis {
    pub const ALL: [Basis; 2] = [Basis::Sine, Basis::Cosine];

    #[inline]
    pub fn eval(self, u: f64) -> f64 {
        match self {
            Basis::Sine => u.sin(),
            Basis::Cosine => u.cos(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Basis::Sine => "sine",
            Basis::Cosine => "cosine",
        }
    }

    /// Short function name for formula captions
    pub fn symbol(self) -> &'static str {
        match self {
            Basis::Sine => "sin",
            Basis::Cosine => "cos",
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Basis {
    type Err = KnotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Basis::Sine),
            "cosine" | "cos" => Ok(Basis::Cosine),
            other => Err(KnotError::UnknownBasis(other.to_string())),
        }
    }
}

/// Everything that controls the shape and resolution of one knot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    pub frequencies: Frequencies,
    /// Phase on the x axis (radians)
    pub phase: f64,
    /// Phase on the y axis (radians)
    pub phase_y: f64,
    /// Number of points along the curve
    pub samples: usize,
    pub basis: Basis,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            frequencies: Frequencies::default(),
            phase: FRAC_PI_2,
            phase_y: 0.0,
            samples: 100,
            basis: Basis::Sine,
        }
    }
}

impl ParameterSet {
    pub fn new(a: f64, b: f64, c: f64, phase: f64, samples: usize) -> Self {
        Self {
            frequencies: Frequencies::new(a, b, c),
            phase,
            samples,
            ..Default::default()
        }
    }

    pub fn with_phase_y(mut self, phase_y: f64) -> Self {
        self.phase_y = phase_y;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_basis(mut self, basis: Basis) -> Self {
        self.basis = basis;
        self
    }

    /// Strict check, no values are changed
    pub fn validate(&self) -> Result<()> {
        for (axis, value) in self.frequencies.labelled() {
            if !value.is_finite() {
                return Err(KnotError::NonFiniteFrequency { axis, value });
            }
            if value.abs() > MAX_FREQUENCY {
                return Err(KnotError::FrequencyOutOfRange {
                    axis,
                    value,
                    max: MAX_FREQUENCY,
                });
            }
        }
        for phase in [self.phase, self.phase_y] {
            if !phase.is_finite() {
                return Err(KnotError::NonFinitePhase(phase));
            }
        }
        if self.samples < MIN_SAMPLES {
            return Err(KnotError::EmptySampleCount {
                min: MIN_SAMPLES,
                got: self.samples,
            });
        }
        if self.samples > MAX_SAMPLES {
            return Err(KnotError::TooManySamples {
                max: MAX_SAMPLES,
                got: self.samples,
            });
        }
        Ok(())
    }

    /// Lenient copy: samples and frequencies clamped into range,
    /// non-finite values replaced by the corresponding default.
    pub fn sanitized(&self) -> Self {
        let fallback = Self::default();
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        let frequency = |v: f64, d: f64| finite_or(v, d).clamp(-MAX_FREQUENCY, MAX_FREQUENCY);

        Self {
            frequencies: Frequencies {
                x: frequency(self.frequencies.x, fallback.frequencies.x),
                y: frequency(self.frequencies.y, fallback.frequencies.y),
                z: frequency(self.frequencies.z, fallback.frequencies.z),
            },
            phase: finite_or(self.phase, fallback.phase),
            phase_y: finite_or(self.phase_y, fallback.phase_y),
            samples: self.samples.clamp(MIN_SAMPLES, MAX_SAMPLES),
            basis: self.basis,
        }
    }

    /// Clamp a raw, possibly negative, sample count from user input
    pub fn clamp_samples(raw: i64) -> usize {
        raw.clamp(MIN_SAMPLES as i64, MAX_SAMPLES as i64) as usize
    }
}
