//! Route handlers for the knot viewer

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use lissajous_core::{ParameterSet, Shadows};
use serde::Serialize;

use crate::query::KnotQuery;
use crate::scene::CameraPreset;
use crate::state::AppState;
use crate::templates::{self, CLOSED_TOLERANCE};

// ============== Page Handlers ==============

/// Full page with the initial knot already rendered
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let (seq, camera) = state.knot_for(&KnotQuery::from_pairs(pairs));
    let svg = state.renderer(camera).render(&seq);
    Html(templates::index_html(&state.config, camera, &seq, &svg))
}

// ============== HTMX Partial Handlers ==============

/// Plot fragment for the current form values
pub async fn knot_fragment(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let (seq, camera) = state.knot_for(&KnotQuery::from_pairs(pairs));
    let svg = state.renderer(camera).render(&seq);
    Html(templates::knot_fragment_html(&seq, &svg, camera))
}

// ============== API Handlers ==============

#[derive(Debug, Serialize)]
pub struct KnotResponse {
    pub params: ParameterSet,
    pub points: Vec<[f64; 3]>,
    pub shadows: Shadows,
    pub closed: bool,
    pub camera: CameraPreset,
}

/// Points as JSON
pub async fn api_knot(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let (seq, camera) = state.knot_for(&KnotQuery::from_pairs(pairs));
    Json(KnotResponse {
        params: *seq.params(),
        shadows: seq.shadows(state.config.figure.shadow_offset),
        closed: seq.is_closed(CLOSED_TOLERANCE),
        camera,
        points: seq.into_points().into_iter().map(Into::into).collect(),
    })
}

/// Standalone SVG document
pub async fn api_knot_svg(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let (seq, camera) = state.knot_for(&KnotQuery::from_pairs(pairs));
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        state.renderer(camera).render(&seq),
    )
}

/// Health check
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "lissajous-web",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Full status API
pub async fn api_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "uptime_secs": state.uptime_secs(),
        "renders": state.render_count(),
        "server": state.config.server.addr(),
        "defaults": state.config.defaults,
        "camera": state.default_camera(),
    }))
}

// ============== Static Assets ==============

pub async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], templates::STYLE_CSS)
}
