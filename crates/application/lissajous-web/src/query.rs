//! Lenient query parsing for the knot routes
//!
//! Every field arrives as a raw string. Values that fail to parse fall
//! back to the configured defaults instead of producing a 400. Handlers
//! extract the raw key/value pairs, so repeated or unknown keys never
//! reject the request either.

use lissajous_core::{Basis, Frequencies, ParameterSet};

use crate::scene::CameraPreset;

#[derive(Debug, Clone, Default)]
pub struct KnotQuery {
    pub a: Option<String>,
    pub b: Option<String>,
    pub c: Option<String>,
    pub phase: Option<String>,
    pub phase_y: Option<String>,
    pub samples: Option<String>,
    pub basis: Option<String>,
    pub camera: Option<String>,
}

fn parse_f64(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl KnotQuery {
    /// Build from raw query pairs. The last value wins for a repeated
    /// key; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut q = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "a" => &mut q.a,
                "b" => &mut q.b,
                "c" => &mut q.c,
                "phase" => &mut q.phase,
                "phase_y" => &mut q.phase_y,
                "samples" => &mut q.samples,
                "basis" => &mut q.basis,
                "camera" => &mut q.camera,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        q
    }

    /// Merge the query over `defaults`; the result is always sanitised
    pub fn params(&self, defaults: &ParameterSet) -> ParameterSet {
        let f = defaults.frequencies;
        let samples = parse_f64(self.samples.as_deref())
            .map(|n| ParameterSet::clamp_samples(n.round() as i64))
            .unwrap_or(defaults.samples);
        let basis = self
            .basis
            .as_deref()
            .and_then(|b| b.parse::<Basis>().ok())
            .unwrap_or(defaults.basis);

        ParameterSet {
            frequencies: Frequencies {
                x: parse_f64(self.a.as_deref()).unwrap_or(f.x),
                y: parse_f64(self.b.as_deref()).unwrap_or(f.y),
                z: parse_f64(self.c.as_deref()).unwrap_or(f.z),
            },
            phase: parse_f64(self.phase.as_deref()).unwrap_or(defaults.phase),
            phase_y: parse_f64(self.phase_y.as_deref()).unwrap_or(defaults.phase_y),
            samples,
            basis,
        }
        .sanitized()
    }

    pub fn camera(&self, default: CameraPreset) -> CameraPreset {
        self.camera
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lissajous_core::{MAX_SAMPLES, MIN_SAMPLES};

    fn query(pairs: &[(&str, &str)]) -> KnotQuery {
        KnotQuery::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_empty_query_is_defaults() {
        let defaults = ParameterSet::default();
        assert_eq!(KnotQuery::default().params(&defaults), defaults);
    }

    #[test]
    fn test_full_query() {
        let q = query(&[
            ("a", "3"),
            ("b", "2"),
            ("c", "7"),
            ("phase", "1.57"),
            ("phase_y", "0.5"),
            ("samples", "1000"),
            ("basis", "cosine"),
        ]);
        let params = q.params(&ParameterSet::default());
        assert_eq!(params.frequencies, Frequencies::new(3.0, 2.0, 7.0));
        assert_eq!(params.phase, 1.57);
        assert_eq!(params.phase_y, 0.5);
        assert_eq!(params.samples, 1000);
        assert_eq!(params.basis, Basis::Cosine);
    }

    #[test]
    fn test_garbage_falls_back() {
        let q = query(&[("a", "abc"), ("b", ""), ("phase", "NaN"), ("basis", "tan")]);
        let defaults = ParameterSet::default();
        let params = q.params(&defaults);
        assert_eq!(params, defaults);
    }

    #[test]
    fn test_samples_clamped() {
        let defaults = ParameterSet::default();
        assert_eq!(query(&[("samples", "-20")]).params(&defaults).samples, MIN_SAMPLES);
        assert_eq!(query(&[("samples", "0")]).params(&defaults).samples, MIN_SAMPLES);
        assert_eq!(query(&[("samples", "1e9")]).params(&defaults).samples, MAX_SAMPLES);
        assert_eq!(query(&[("samples", "99.6")]).params(&defaults).samples, 100);
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let q = query(&[("a", "3"), ("samples", "10"), ("a", "5"), ("samples", "20")]);
        let params = q.params(&ParameterSet::default());
        assert_eq!(params.frequencies.x, 5.0);
        assert_eq!(params.samples, 20);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let q = query(&[("zoom", "4"), ("b", "6")]);
        assert_eq!(q.params(&ParameterSet::default()).frequencies.y, 6.0);
    }

    #[test]
    fn test_camera() {
        assert_eq!(
            query(&[("camera", "rear")]).camera(CameraPreset::Default),
            CameraPreset::Rear
        );
        assert_eq!(
            query(&[("camera", "???")]).camera(CameraPreset::Top),
            CameraPreset::Top
        );
        assert_eq!(KnotQuery::default().camera(CameraPreset::Front), CameraPreset::Front);
    }
}
