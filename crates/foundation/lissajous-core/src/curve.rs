//! Point generation
//!
//! `t` runs over the closed interval `[-π, π]` with both endpoints
//! sampled, so a knot with whole-number frequencies starts and ends on
//! the same point.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

/// Distance of each shadow plane from the knot, as a multiple of the
/// axis minimum.
pub const DEFAULT_SHADOW_OFFSET: f64 = 1.5;

/// Spatial axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// One sampled point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy with one coordinate replaced
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

/// Positions of the three projection planes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadows {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Shadows {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// The sampled knot, together with the parameters that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSequence {
    params: ParameterSet,
    points: Vec<Point3>,
}

impl PointSequence {
    /// Parameters after sanitising
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    /// Whether the first and last samples coincide
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.distance(last) <= tolerance,
            _ => false,
        }
    }

    /// Minimum and maximum along one axis
    pub fn range(&self, axis: Axis) -> (f64, f64) {
        self.points
            .iter()
            .map(|p| p.get(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Shadow planes at `min(axis) * offset`
    pub fn shadows(&self, offset: f64) -> Shadows {
        let plane = |axis| self.range(axis).0 * offset;
        Shadows {
            x: plane(Axis::X),
            y: plane(Axis::Y),
            z: plane(Axis::Z),
        }
    }

    /// The knot flattened onto the plane `axis = plane`
    pub fn projected(&self, axis: Axis, plane: f64) -> Vec<Point3> {
        self.points.iter().map(|p| p.with(axis, plane)).collect()
    }

    /// Consecutive point pairs, including the segment that closes the loop
    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Sample times: `samples` evenly spaced values from -π to π inclusive
pub fn sample_times(samples: usize) -> impl Iterator<Item = f64> {
    let last = samples.saturating_sub(1).max(1) as f64;
    (0..samples).map(move |i| -PI + 2.0 * PI * (i as f64 / last))
}

/// Evaluate the knot at a single `t`
pub fn evaluate(params: &ParameterSet, t: f64) -> Point3 {
    let f = params.frequencies;
    let basis = params.basis;
    Point3 {
        x: basis.eval(f.x * t + params.phase),
        y: basis.eval(f.y * t + params.phase_y),
        z: basis.eval(f.z * t),
    }
}

/// Compute the point sequence for a parameter set.
///
/// Parameters are sanitised first, so the result always holds between
/// `MIN_SAMPLES` and `MAX_SAMPLES` points.
pub fn generate(params: &ParameterSet) -> PointSequence {
    let params = params.sanitized();
    let points = sample_times(params.samples)
        .map(|t| evaluate(&params, t))
        .collect();

    PointSequence { params, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Basis, MAX_FREQUENCY, MIN_SAMPLES};

    fn example() -> ParameterSet {
        ParameterSet::new(3.0, 2.0, 7.0, 1.57, 1000)
    }

    #[test]
    fn test_length_matches_sample_count() {
        for samples in [2, 10, 100, 600, 1000] {
            let seq = generate(&ParameterSet::default().with_samples(samples));
            assert_eq!(seq.len(), samples);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = generate(&example());
        let b = generate(&example());
        assert_eq!(a, b);
    }

    #[test]
    fn test_coordinates_in_unit_range() {
        for basis in Basis::ALL {
            let seq = generate(&example().with_basis(basis).with_phase_y(0.4));
            for p in &seq {
                for axis in Axis::ALL {
                    let v = p.get(axis);
                    assert!((-1.0..=1.0).contains(&v), "{} out of range: {}", axis.label(), v);
                }
            }
        }
    }

    #[test]
    fn test_example_knot_closes() {
        let seq = generate(&example());
        assert_eq!(seq.len(), 1000);
        assert!(seq.is_closed(1e-9));
    }

    #[test]
    fn test_fractional_frequency_does_not_close() {
        let seq = generate(&ParameterSet::new(1.5, 2.0, 1.0, 0.3, 500));
        assert!(!seq.is_closed(1e-6));
    }

    #[test]
    fn test_sample_count_does_not_change_shape() {
        let coarse = generate(&example().with_samples(101));
        let fine = generate(&example().with_samples(201));

        // Every coarse sample is also a fine sample
        for (i, p) in coarse.iter().enumerate() {
            assert!(p.distance(&fine.points()[2 * i]) < 1e-12);
        }
    }

    #[test]
    fn test_zero_samples_clamped() {
        let seq = generate(&ParameterSet::default().with_samples(0));
        assert_eq!(seq.len(), MIN_SAMPLES);
        assert_eq!(seq.params().samples, MIN_SAMPLES);
    }

    #[test]
    fn test_non_finite_input_does_not_poison_output() {
        let seq = generate(&ParameterSet::new(f64::NAN, 2.0, 7.0, f64::INFINITY, 50));
        assert!(seq.iter().all(|p| p.to_array().iter().all(|v| v.is_finite())));
    }

    #[test]
    fn test_huge_frequency_stays_in_range() {
        let params = ParameterSet::new(1e308, 2.0, 7.0, 1.57, 10);
        assert!(params.validate().is_err());

        let seq = generate(&params);
        assert_eq!(seq.params().frequencies.x, MAX_FREQUENCY);
        for p in &seq {
            assert!((-1.0..=1.0).contains(&p.x), "x out of range: {}", p.x);
        }
    }

    #[test]
    fn test_formula_at_first_sample() {
        let params = ParameterSet::new(3.0, 2.0, 7.0, 1.57, 11);
        let seq = generate(&params);
        let t = -PI;
        let first = seq.points()[0];
        assert!((first.x - (3.0 * t + 1.57).sin()).abs() < 1e-12);
        assert!((first.y - (2.0 * t).sin()).abs() < 1e-12);
        assert!((first.z - (7.0 * t).sin()).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_is_shifted_sine() {
        let sine = generate(&example().with_phase_y(std::f64::consts::FRAC_PI_2));
        let cosine = generate(&example().with_basis(Basis::Cosine));
        // cos(u) = sin(u + π/2) only lines up on the y axis here
        for (s, c) in sine.iter().zip(cosine.iter()) {
            assert!((s.y - c.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_times_endpoints() {
        let ts: Vec<f64> = sample_times(5).collect();
        assert_eq!(ts.len(), 5);
        assert!((ts[0] + PI).abs() < 1e-15);
        assert!((ts[4] - PI).abs() < 1e-15);
        assert!(ts[2].abs() < 1e-15);
    }

    #[test]
    fn test_shadows_sit_beyond_minimum() {
        let seq = generate(&ParameterSet::default());
        let shadows = seq.shadows(DEFAULT_SHADOW_OFFSET);
        for axis in Axis::ALL {
            let (lo, _) = seq.range(axis);
            assert!((shadows.get(axis) - lo * DEFAULT_SHADOW_OFFSET).abs() < 1e-12);
            assert!(shadows.get(axis) <= lo);
        }
    }

    #[test]
    fn test_projection_flattens_one_axis() {
        let seq = generate(&ParameterSet::default());
        let flat = seq.projected(Axis::Z, -1.5);
        assert_eq!(flat.len(), seq.len());
        for (p, q) in seq.iter().zip(flat.iter()) {
            assert_eq!(q.z, -1.5);
            assert_eq!(p.x, q.x);
            assert_eq!(p.y, q.y);
        }
    }

    #[test]
    fn test_segments_close_loop() {
        let seq = generate(&ParameterSet::default().with_samples(4));
        let segs: Vec<_> = seq.segments().collect();
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[3].0, seq.points()[3]);
        assert_eq!(segs[3].1, seq.points()[0]);
    }
}
