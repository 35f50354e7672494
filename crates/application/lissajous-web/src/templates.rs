//! HTML templates for the knot viewer
//!
//! Uses HTMX for server-driven updates; the plot itself is inline SVG.

use lissajous_config::ViewerConfig;
use lissajous_core::{ParameterSet, PointSequence, MAX_FREQUENCY};

use crate::scene::CameraPreset;

/// Distance under which first and last point count as the same
pub const CLOSED_TOLERANCE: f64 = 1e-6;

/// CSS styles
pub const STYLE_CSS: &str = r#"
:root {
    --bg-primary: #222;
    --bg-secondary: #303030;
    --bg-tertiary: #444;
    --accent: #00bc8c;
    --gold: darkgoldenrod;
    --text-primary: #fff;
    --text-secondary: #adb5bd;
    --border: #444;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: Lato, -apple-system, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    min-height: 100vh;
    line-height: 1.5;
    padding: 16px 24px;
}

a {
    color: var(--accent);
}

hr {
    border: none;
    border-top: 1px solid var(--border);
    margin: 16px 0;
}

.header h2 {
    font-weight: 400;
}

.header h5 {
    color: var(--text-secondary);
    font-weight: 400;
}

.layout {
    display: grid;
    grid-template-columns: minmax(240px, 25%) 1fr;
    gap: 24px;
}

.controls h5 {
    margin: 12px 0 8px;
}

.field {
    margin-bottom: 12px;
}

.field label {
    display: flex;
    justify-content: space-between;
    color: var(--text-secondary);
    font-size: 0.9em;
}

.field input[type=number],
.field select {
    width: 100%;
    padding: 6px 10px;
    background: var(--bg-secondary);
    color: var(--text-primary);
    border: 1px solid var(--border);
    border-radius: 4px;
}

.field input[type=range] {
    width: 100%;
    accent-color: var(--accent);
}

.cameras {
    display: flex;
    flex-wrap: wrap;
    gap: 6px;
}

.cameras input {
    display: none;
}

.cameras label {
    padding: 4px 10px;
    background: grey;
    color: black;
    border-radius: 4px;
    cursor: pointer;
    font-size: 0.85em;
}

.cameras input:checked + label {
    background: var(--accent);
    color: var(--text-primary);
}

.reference p {
    color: var(--text-secondary);
    font-size: 0.9em;
    font-family: 'JetBrains Mono', 'Fira Code', monospace;
}

.display {
    min-height: 80vh;
}

.display svg {
    width: 100%;
    height: auto;
    max-height: 80vh;
}

.caption {
    color: var(--text-secondary);
    font-size: 0.85em;
}

.caption .closed {
    color: var(--accent);
}

.caption .open {
    color: var(--gold);
}

.htmx-indicator {
    display: none;
}

.htmx-request .htmx-indicator {
    display: inline;
}
"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn number_field(label: &str, name: &str, value: f64) -> String {
    format!(
        "<div class=\"field\">
            <label for=\"{name}\">{label}</label>
            <input id=\"{name}\" name=\"{name}\" type=\"number\" step=\"1\" min=\"{min}\" max=\"{max}\" value=\"{value}\">
        </div>",
        name = name,
        label = label,
        value = value,
        min = -MAX_FREQUENCY,
        max = MAX_FREQUENCY,
    )
}

fn range_field(label: &str, name: &str, min: f64, max: f64, step: f64, value: f64) -> String {
    format!(
        "<div class=\"field\">
            <label for=\"{name}\">{label} <output>{value:.2}</output></label>
            <input id=\"{name}\" name=\"{name}\" type=\"range\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\"
                   oninput=\"this.previousElementSibling.lastElementChild.value = Number(this.value).toFixed(2)\">
        </div>",
        name = name,
        label = label,
        min = min,
        max = max,
        step = step,
        value = value,
    )
}

fn basis_field(params: &ParameterSet) -> String {
    let options: String = lissajous_core::Basis::ALL
        .iter()
        .map(|b| {
            let selected = if *b == params.basis { " selected" } else { "" };
            format!("<option value=\"{}\"{}>{}</option>", b.as_str(), selected, b.symbol())
        })
        .collect();
    format!(
        "<div class=\"field\">
            <label for=\"basis\">Basis</label>
            <select id=\"basis\" name=\"basis\">{}</select>
        </div>",
        options
    )
}

fn camera_field(active: CameraPreset) -> String {
    let buttons: String = CameraPreset::ALL
        .iter()
        .map(|p| {
            let checked = if *p == active { " checked" } else { "" };
            format!(
                "<input type=\"radio\" id=\"camera-{slug}\" name=\"camera\" value=\"{slug}\"{checked}>\
                 <label for=\"camera-{slug}\">{label}</label>",
                slug = p.slug(),
                checked = checked,
                label = p.label(),
            )
        })
        .collect();
    format!("<div class=\"field\"><label>View</label><div class=\"cameras\">{}</div></div>", buttons)
}

/// Parameter form; every change re-renders `#display`
pub fn controls_html(config: &ViewerConfig, params: &ParameterSet, camera: CameraPreset) -> String {
    let f = params.frequencies;
    let phase = config.sliders.phase;
    let samples = config.sliders.samples;

    format!(
        "<form id=\"knot-form\" hx-get=\"/htmx/knot\" hx-target=\"#display\" hx-trigger=\"input delay:150ms\" hx-indicator=\"#spinner\">
            <h5>Parameters</h5>
            {}{}{}{}{}{}{}{}
        </form>",
        number_field("A", "a", f.x),
        number_field("B", "b", f.y),
        number_field("C", "c", f.z),
        range_field("ϕ1 [0 to 2π]", "phase", phase.min, phase.max, phase.step, params.phase),
        range_field("ϕ2 [0 to 2π]", "phase_y", phase.min, phase.max, phase.step, params.phase_y),
        range_field(
            "Number of points",
            "samples",
            samples.min,
            samples.max,
            samples.step,
            samples.clamp(params.samples as f64),
        ),
        basis_field(params),
        camera_field(camera),
    )
}

/// Reference panel with the formula for the current basis
pub fn reference_html(params: &ParameterSet) -> String {
    let f = params.basis.symbol();
    format!(
        "<div class=\"reference\">
            <h5>Reference</h5>
            <p>LISSAJOUS KNOTS - M. G. V. BOGLE, J. E. HEARST, V. F. R. JONES and L. STOILOV (1994)</p>
            <p>A, B, C = 1, 2, 3...</p>
            <p>x = {f}(At + ϕ1)</p>
            <p>y = {f}(Bt + ϕ2)</p>
            <p>z = {f}(Ct)</p>
            <p>with -π &le; t &le; π</p>
        </div>",
        f = f
    )
}

/// The plot fragment swapped in by HTMX
pub fn knot_fragment_html(seq: &PointSequence, svg: &str, camera: CameraPreset) -> String {
    let p = seq.params();
    let (class, closed) = if seq.is_closed(CLOSED_TOLERANCE) {
        ("closed", "closed")
    } else {
        ("open", "open")
    };
    format!(
        "{svg}
        <div class=\"caption\">
            {n} points | <span class=\"{class}\">{closed}</span> |
            A={a} B={b} C={c} ϕ1={p1:.2} ϕ2={p2:.2} | {basis} | view: {view}
        </div>",
        svg = svg,
        n = seq.len(),
        class = class,
        closed = closed,
        a = p.frequencies.x,
        b = p.frequencies.y,
        c = p.frequencies.z,
        p1 = p.phase,
        p2 = p.phase_y,
        basis = p.basis.symbol(),
        view = html_escape(camera.label()),
    )
}

/// Full page
pub fn index_html(config: &ViewerConfig, camera: CameraPreset, seq: &PointSequence, svg: &str) -> String {
    let params = seq.params();
    format!(
"<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
    <title>Lissajous Knots</title>
    <link rel=\"stylesheet\" href=\"/static/style.css\">
    <script src=\"https://unpkg.com/htmx.org@1.9.10\"></script>
</head>
<body>
    <header class=\"header\">
        <h2>Lissajous Knots</h2>
        <h5>Interactive 3D viewer</h5>
    </header>
    <hr>
    <div class=\"layout\">
        <aside class=\"controls\">
            {controls}
            <span id=\"spinner\" class=\"htmx-indicator\">Rendering...</span>
            <hr>
            {reference}
        </aside>
        <main class=\"display\" id=\"display\">
            {fragment}
        </main>
    </div>
    <hr>
    <footer class=\"caption\">Serving on {url}</footer>
</body>
</html>",
        controls = controls_html(config, params, camera),
        reference = reference_html(params),
        fragment = knot_fragment_html(seq, svg, camera),
        url = html_escape(&config.server.url()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lissajous_core::{generate, Basis};

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
    }

    #[test]
    fn test_controls_reflect_params() {
        let config = ViewerConfig::default();
        let params = ParameterSet::new(3.0, 2.0, 7.0, 1.5, 250).with_basis(Basis::Cosine);
        let html = controls_html(&config, &params, CameraPreset::Top);

        assert!(html.contains("name=\"a\" type=\"number\" step=\"1\" min=\"-1000\" max=\"1000\" value=\"3\""));
        assert!(html.contains("name=\"c\" type=\"number\" step=\"1\" min=\"-1000\" max=\"1000\" value=\"7\""));
        assert!(html.contains("max=\"600\" step=\"10\" value=\"250\""));
        assert!(html.contains("<option value=\"cosine\" selected>cos</option>"));
        assert!(html.contains("value=\"top\" checked"));
        assert_eq!(html.matches("type=\"radio\"").count(), CameraPreset::ALL.len());
    }

    #[test]
    fn test_samples_slider_clamped_to_range() {
        let config = ViewerConfig::default();
        let params = ParameterSet::default().with_samples(5000);
        let html = controls_html(&config, &params, CameraPreset::Default);
        assert!(html.contains("step=\"10\" value=\"600\""));
    }

    #[test]
    fn test_reference_formula_follows_basis() {
        let html = reference_html(&ParameterSet::default());
        assert!(html.contains("x = sin(At + ϕ1)"));
        let html = reference_html(&ParameterSet::default().with_basis(Basis::Cosine));
        assert!(html.contains("z = cos(Ct)"));
    }

    #[test]
    fn test_fragment_caption() {
        let seq = generate(&ParameterSet::new(3.0, 2.0, 7.0, 1.57, 1000));
        let html = knot_fragment_html(&seq, "<svg></svg>", CameraPreset::LateralRight);
        assert!(html.starts_with("<svg></svg>"));
        assert!(html.contains("1000 points"));
        assert!(html.contains("class=\"closed\""));
        assert!(html.contains("view: Lateral Right"));
    }

    #[test]
    fn test_index_page() {
        let config = ViewerConfig::default();
        let seq = generate(&config.defaults);
        let html = index_html(&config, CameraPreset::Default, &seq, "<svg id=\"plot\"></svg>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<svg id=\"plot\"></svg>"));
        assert!(html.contains("hx-get=\"/htmx/knot\""));
        assert!(html.contains("http://127.0.0.1:8050"));
    }
}
