//! Offline output: point dumps and SVG files

use std::fmt::Write as _;

use lissajous_core::{PointSequence, DEFAULT_SHADOW_OFFSET};
use lissajous_web::{CameraPreset, SceneRenderer};

/// Points with their parameters as pretty JSON
pub fn points_json(seq: &PointSequence) -> serde_json::Result<String> {
    let points: Vec<[f64; 3]> = seq.iter().map(|p| p.to_array()).collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "params": seq.params(),
        "closed": seq.is_closed(1e-6),
        "points": points,
    }))
}

/// One `x,y,z` row per point, with a header
pub fn points_csv(seq: &PointSequence) -> String {
    let mut out = String::with_capacity(seq.len() * 48 + 8);
    out.push_str("x,y,z\n");
    for p in seq {
        let _ = writeln!(out, "{},{},{}", p.x, p.y, p.z);
    }
    out
}

pub fn scene_svg(
    seq: &PointSequence,
    camera: CameraPreset,
    size: u32,
    shadow_offset: Option<f64>,
) -> String {
    SceneRenderer::new(size)
        .with_camera(camera)
        .with_shadow_offset(shadow_offset.unwrap_or(DEFAULT_SHADOW_OFFSET))
        .render(seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lissajous_core::{generate, ParameterSet};

    #[test]
    fn test_csv_rows() {
        let seq = generate(&ParameterSet::default().with_samples(10));
        let csv = points_csv(&seq);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "x,y,z");
        assert_eq!(lines[1].split(',').count(), 3);
    }

    #[test]
    fn test_json_shape() {
        let seq = generate(&ParameterSet::new(3.0, 2.0, 7.0, 1.57, 1000));
        let json: serde_json::Value = serde_json::from_str(&points_json(&seq).unwrap()).unwrap();
        assert_eq!(json["points"].as_array().unwrap().len(), 1000);
        assert_eq!(json["params"]["samples"], 1000);
        assert_eq!(json["closed"], true);
    }

    #[test]
    fn test_svg_size() {
        let seq = generate(&ParameterSet::default());
        let svg = scene_svg(&seq, CameraPreset::Top, 320, None);
        assert!(svg.contains(r#"width="320""#));
    }
}
