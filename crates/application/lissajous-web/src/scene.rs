//! SVG scene renderer
//!
//! Orthographic projection of the knot and its three shadows. Segments
//! are painted back to front so nearer strands cover farther ones.

use std::fmt::Write as _;
use std::str::FromStr;

use glam::{DVec2, DVec3};
use lissajous_core::{Axis, Point3, PointSequence, DEFAULT_SHADOW_OFFSET};
use serde::{Deserialize, Serialize};

const KNOT_COLOR: &str = "darkgoldenrod";
const SHADOW_COLOR: &str = "mediumspringgreen";
const AXIS_COLOR: &str = "#888";
const KNOT_WIDTH: f64 = 6.0;
const SHADOW_WIDTH: f64 = 3.0;
const PADDING: f64 = 48.0;

/// Named viewpoints offered as buttons under the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraPreset {
    #[default]
    Default,
    Top,
    LateralRight,
    LateralLeft,
    Front,
    Rear,
}

impl CameraPreset {
    pub const ALL: [CameraPreset; 6] = [
        CameraPreset::Default,
        CameraPreset::Top,
        CameraPreset::LateralRight,
        CameraPreset::LateralLeft,
        CameraPreset::Front,
        CameraPreset::Rear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CameraPreset::Default => "Default",
            CameraPreset::Top => "Top",
            CameraPreset::LateralRight => "Lateral Right",
            CameraPreset::LateralLeft => "Lateral Left",
            CameraPreset::Front => "Front",
            CameraPreset::Rear => "Rear",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            CameraPreset::Default => "default",
            CameraPreset::Top => "top",
            CameraPreset::LateralRight => "lateral-right",
            CameraPreset::LateralLeft => "lateral-left",
            CameraPreset::Front => "front",
            CameraPreset::Rear => "rear",
        }
    }

    pub fn camera(self) -> Camera {
        let v = DVec3::new;
        match self {
            CameraPreset::Default => Camera::new(v(1.5, 1.5, 1.5), DVec3::Z),
            CameraPreset::Top => Camera::new(v(0.0, 0.0, 2.5), DVec3::Y),
            CameraPreset::LateralRight => Camera::new(v(2.5, 0.0, 0.0), DVec3::Z),
            CameraPreset::LateralLeft => Camera::new(v(-2.5, 0.0, 0.0), DVec3::Z),
            CameraPreset::Front => Camera::new(v(0.0, 2.5, 0.0), v(0.0, 1.0, 1.0)),
            CameraPreset::Rear => Camera::new(v(0.0, -2.5, 0.0), v(0.0, 1.0, 1.0)),
        }
    }
}

impl FromStr for CameraPreset {
    type Err = String;

    /// Accepts slugs, labels and snake case ("lateral_right", "Lateral Right")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        CameraPreset::ALL
            .into_iter()
            .find(|p| p.slug().replace('-', "") == key)
            .ok_or_else(|| format!("unknown camera preset: {}", s))
    }
}

/// Orthographic camera looking from `eye` at `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: DVec3,
    pub up: DVec3,
    pub center: DVec3,
}

impl Camera {
    pub fn new(eye: DVec3, up: DVec3) -> Self {
        Self {
            eye,
            up,
            center: DVec3::ZERO,
        }
    }

    /// Orthonormal view frame, computed once per render
    pub fn projection(&self) -> Projection {
        let forward = (self.center - self.eye)
            .try_normalize()
            .unwrap_or(DVec3::NEG_Z);
        let right = forward
            .cross(self.up)
            .try_normalize()
            .unwrap_or_else(|| forward.any_orthonormal_vector());
        Projection {
            center: self.center,
            right,
            up: right.cross(forward),
            forward,
        }
    }

    /// Screen position (y up) and depth (larger is farther away)
    pub fn project(&self, p: DVec3) -> (DVec2, f64) {
        self.projection().project(p)
    }
}

/// Screen right, screen up and view direction of a [`Camera`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    center: DVec3,
    right: DVec3,
    up: DVec3,
    forward: DVec3,
}

impl Projection {
    pub fn project(&self, p: DVec3) -> (DVec2, f64) {
        let rel = p - self.center;
        (DVec2::new(rel.dot(self.right), rel.dot(self.up)), self.depth(p))
    }

    pub fn depth(&self, p: DVec3) -> f64 {
        (p - self.center).dot(self.forward)
    }
}

#[derive(Debug, Clone, Copy)]
struct Stroke {
    a: DVec3,
    b: DVec3,
    color: &'static str,
    width: f64,
    class: &'static str,
}

fn to_vec(p: Point3) -> DVec3 {
    DVec3::new(p.x, p.y, p.z)
}

/// Painter's order: farthest stroke first. Depth is computed once per stroke.
fn painter_order(strokes: Vec<Stroke>, view: &Projection) -> Vec<Stroke> {
    let mut keyed: Vec<(f64, Stroke)> = strokes
        .into_iter()
        .map(|s| (view.depth(s.a) + view.depth(s.b), s))
        .collect();
    keyed.sort_by(|(ds, _), (dt, _)| dt.total_cmp(ds));
    keyed.into_iter().map(|(_, s)| s).collect()
}

/// Renders a point sequence to a standalone SVG document
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    size: u32,
    shadow_offset: f64,
    camera: CameraPreset,
    title: bool,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(850)
    }
}

impl SceneRenderer {
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(1),
            shadow_offset: DEFAULT_SHADOW_OFFSET,
            camera: CameraPreset::Default,
            title: true,
        }
    }

    pub fn with_shadow_offset(mut self, offset: f64) -> Self {
        self.shadow_offset = offset;
        self
    }

    pub fn with_camera(mut self, camera: CameraPreset) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_title(mut self, title: bool) -> Self {
        self.title = title;
        self
    }

    fn strokes(&self, seq: &PointSequence) -> Vec<Stroke> {
        let shadows = seq.shadows(self.shadow_offset);
        let mut strokes = Vec::with_capacity(seq.len() * 4);

        for (a, b) in seq.segments() {
            strokes.push(Stroke {
                a: to_vec(a),
                b: to_vec(b),
                color: KNOT_COLOR,
                width: KNOT_WIDTH,
                class: "knot",
            });
            for axis in Axis::ALL {
                let plane = shadows.get(axis);
                strokes.push(Stroke {
                    a: to_vec(a.with(axis, plane)),
                    b: to_vec(b.with(axis, plane)),
                    color: SHADOW_COLOR,
                    width: SHADOW_WIDTH,
                    class: match axis {
                        Axis::X => "shadow-x",
                        Axis::Y => "shadow-y",
                        Axis::Z => "shadow-z",
                    },
                });
            }
        }
        strokes
    }

    /// Axis lines run from the shadow corner to the far side of the curve
    fn axes(&self, seq: &PointSequence) -> Vec<(Axis, DVec3, DVec3)> {
        let shadows = seq.shadows(self.shadow_offset);
        let origin = DVec3::new(shadows.x, shadows.y, shadows.z);
        Axis::ALL
            .into_iter()
            .map(|axis| {
                let (_, hi) = seq.range(axis);
                let end = to_vec(Point3::new(origin.x, origin.y, origin.z).with(axis, hi));
                (axis, origin, end)
            })
            .collect()
    }

    pub fn render(&self, seq: &PointSequence) -> String {
        let view = self.camera.camera().projection();
        let size = self.size as f64;

        let strokes = self.strokes(seq);
        let axes = self.axes(seq);

        // Fit everything into the viewport with a uniform scale
        let mut lo = DVec2::splat(f64::INFINITY);
        let mut hi = DVec2::splat(f64::NEG_INFINITY);
        let endpoints = strokes
            .iter()
            .flat_map(|s| [s.a, s.b])
            .chain(axes.iter().flat_map(|(_, a, b)| [*a, *b]));
        for p in endpoints {
            let (q, _) = view.project(p);
            lo = lo.min(q);
            hi = hi.max(q);
        }
        let extent = hi - lo;
        let avail = (size - 2.0 * PADDING).max(1.0);
        let span = extent.max_element();
        let scale = if span.is_finite() && span > 1e-9 { avail / span } else { 1.0 };
        let margin = (DVec2::splat(avail) - extent * scale) * 0.5;

        let to_screen = |p: DVec3| -> DVec2 {
            let (q, _) = view.project(p);
            DVec2::new(
                PADDING + margin.x + (q.x - lo.x) * scale,
                PADDING + margin.y + (hi.y - q.y) * scale,
            )
        };

        let strokes = painter_order(strokes, &view);

        let mut svg = String::with_capacity(strokes.len() * 96 + 1024);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" width="{s}" height="{s}" class="knot-scene" role="img" aria-label="Lissajous knot">"#,
            s = self.size
        );
        svg.push_str(r#"<rect width="100%" height="100%" fill="rgba(0,0,0,0)"/>"#);

        if self.title {
            svg.push_str(
                r##"<text x="12" y="28" class="scene-title" fill="#e0e0e0" font-size="20" font-weight="bold">Lissajous Knot</text>"##,
            );
        }

        svg.push_str(r#"<g class="axes">"#);
        for (axis, a, b) in &axes {
            let (p, q) = (to_screen(*a), to_screen(*b));
            let _ = write!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
                p.x, p.y, q.x, q.y, AXIS_COLOR
            );
            let _ = write!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" fill="{}" font-size="14">{}</text>"#,
                q.x + 6.0,
                q.y - 6.0,
                AXIS_COLOR,
                axis.label()
            );
        }
        svg.push_str("</g>");

        svg.push_str(r#"<g class="strokes" stroke-linecap="round" fill="none">"#);
        for s in &strokes {
            let (p, q) = (to_screen(s.a), to_screen(s.b));
            let _ = write!(
                svg,
                r#"<line class="{}" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
                s.class, p.x, p.y, q.x, q.y, s.color, s.width
            );
        }
        svg.push_str("</g>");

        self.render_legend(&mut svg);
        svg.push_str("</svg>");
        svg
    }

    fn render_legend(&self, svg: &mut String) {
        let x = self.size as f64 - 130.0;
        let entries = [
            ("3D", KNOT_COLOR, KNOT_WIDTH),
            ("X Offset", SHADOW_COLOR, SHADOW_WIDTH),
            ("Y Offset", SHADOW_COLOR, SHADOW_WIDTH),
            ("Z Offset", SHADOW_COLOR, SHADOW_WIDTH),
        ];
        svg.push_str(r#"<g class="legend">"#);
        for (i, (name, color, width)) in entries.iter().enumerate() {
            let y = 24.0 + i as f64 * 20.0;
            let _ = write!(
                svg,
                r##"<line x1="{x:.0}" y1="{y:.0}" x2="{x2:.0}" y2="{y:.0}" stroke="{color}" stroke-width="{width}"/><text x="{tx:.0}" y="{ty:.0}" fill="#e0e0e0" font-size="13">{name}</text>"##,
                x = x,
                x2 = x + 24.0,
                y = y,
                color = color,
                width = width,
                tx = x + 32.0,
                ty = y + 4.0,
                name = name,
            );
        }
        svg.push_str("</g>");
    }
}
