//! Application state for the viewer

use std::sync::atomic::{AtomicU64, Ordering};

use lissajous_config::ViewerConfig;
use lissajous_core::{generate, PointSequence};

use crate::query::KnotQuery;
use crate::scene::{CameraPreset, SceneRenderer};

/// Shared, read-mostly state
pub struct AppState {
    pub config: ViewerConfig,
    /// Server start time
    pub started_at: chrono::DateTime<chrono::Utc>,
    renders: AtomicU64,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            started_at: chrono::Utc::now(),
            renders: AtomicU64::new(0),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    pub fn render_count(&self) -> u64 {
        self.renders.load(Ordering::Relaxed)
    }

    /// Camera named in the config, or `Default` if the name is unknown
    pub fn default_camera(&self) -> CameraPreset {
        self.config.figure.camera.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, using default view", e);
            CameraPreset::Default
        })
    }

    pub fn renderer(&self, camera: CameraPreset) -> SceneRenderer {
        SceneRenderer::new(self.config.figure.size)
            .with_shadow_offset(self.config.figure.shadow_offset)
            .with_camera(camera)
    }

    /// Generate the knot for a request and count it
    pub fn knot_for(&self, query: &KnotQuery) -> (PointSequence, CameraPreset) {
        let params = query.params(&self.config.defaults);
        let camera = query.camera(self.default_camera());
        let seq = generate(&params);
        let n = self.renders.fetch_add(1, Ordering::Relaxed) + 1;

        tracing::debug!(
            render = n,
            a = params.frequencies.x,
            b = params.frequencies.y,
            c = params.frequencies.z,
            phase = params.phase,
            phase_y = params.phase_y,
            samples = params.samples,
            basis = %params.basis,
            camera = camera.slug(),
            "generated knot"
        );
        (seq, camera)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}
