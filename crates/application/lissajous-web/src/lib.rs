//! Lissajous Knots web viewer
//!
//! One page, one plot. The form posts nothing: every input change issues
//! an HTMX `GET /htmx/knot` and the server answers with a fresh SVG.
//!
//! ## Philosophy
//!
//! - **Pure core**: the handlers only turn a query into a `ParameterSet`
//! - **SVG as the plot**: orthographic projection rendered server-side
//! - **HTMX for reactivity**: no JavaScript plotting library

pub mod handlers;
pub mod query;
pub mod routes;
pub mod scene;
pub mod state;
pub mod templates;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use query::KnotQuery;
pub use scene::{Camera, CameraPreset, Projection, SceneRenderer};
pub use state::AppState;

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/htmx/knot", get(handlers::knot_fragment))
        .route("/api/knot", get(handlers::api_knot))
        .route("/api/knot.svg", get(handlers::api_knot_svg))
        .route("/api/health", get(handlers::health))
        .route("/api/status", get(handlers::api_status))
        .route("/static/style.css", get(handlers::style_css))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the listening socket
pub async fn bind(addr: &str) -> std::io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

/// Serve on an already bound listener
pub async fn serve_on(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    tracing::info!("Lissajous viewer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Start the web server
pub async fn serve(
    state: Arc<AppState>,
    addr: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = bind(addr).await?;
    serve_on(listener, state).await
}
