//! depviz library - re-exports for testing and external use.
//!
//! The viewer shows biomedical-paper annotations produced by a separate NLP
//! server: highlighted entities, entity statistics, and dependency-parse
//! graphs laid out and drawn as SVG on this side.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

pub mod client;
pub mod config;
pub mod handlers;
pub mod layout;
pub mod logging;
pub mod models;
pub mod render;
pub mod sentences;
pub mod stats;
pub mod templates;
pub mod viewport;
pub mod visualization;

// ============================================================================
// Application State
// ============================================================================

/// Shared, read-only state. Per-view state (zoom, the current parse) lives
/// in each request, not here.
pub struct AppState {
    pub client: client::ApiClient,
    pub viewer_config: models::ViewerConfig,
}

impl AppState {
    pub fn new(client: client::ApiClient, viewer_config: models::ViewerConfig) -> Self {
        Self {
            client,
            viewer_config,
        }
    }
}

/// All viewer routes, with `/static` served from `static_dir`.
pub fn router(state: Arc<AppState>, static_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/paper", get(handlers::paper))
        .route("/search", get(handlers::search))
        .route("/parse", get(handlers::parse_page))
        .route("/entity", get(handlers::entity))
        .route("/api/layout", post(handlers::layout_api))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

// Re-export commonly used types
pub use client::{ApiClient, ApiError, ApiResult};
pub use config::{ConfigError, Settings};
pub use layout::{
    build_scene, compute_positions, ArcCurve, LayoutSettings, Point, Scene, SkippedArc,
    TokenNode, TokenPosition,
};
pub use models::{
    ArcDirection, DependencyArc, EntityInfo, EntityInfoRequest, PaperView, ParseData,
    SearchQuery, SearchResponse, Token, ViewerConfig,
};
pub use render::{render_scene, SceneSink, SvgSink};
pub use viewport::{ViewTransform, ZoomAction, ZoomSettings};
pub use visualization::{DependencyVisualization, Rendered};
