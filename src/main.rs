//! depviz - biomedical annotation viewer.
//!
//! This is the main entry point for the viewer web server.
//! The application is organized into the following modules:
//!
//! - `models`: Wire types for parses, papers, search results and config
//! - `layout`: Dependency graph layout (positions, arc curves)
//! - `viewport`: Pan/zoom transform
//! - `render`: Scene sinks, SVG output
//! - `visualization`: One parse's scene plus its view transform
//! - `client`: Calls to the NLP server
//! - `templates`: HTML/CSS templates and rendering
//! - `handlers`: HTTP route handlers

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use depviz::{config, logging, router, ApiClient, AppState, Settings};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let client = match ApiClient::new(&settings.backend_url, settings.timeout) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "cannot create backend client");
            return ExitCode::FAILURE;
        }
    };

    let viewer_config = config::resolve_viewer_config(&settings, &client).await;
    let state = Arc::new(AppState::new(client, viewer_config));
    let app = router(state, &settings.static_dir);

    let listener = match tokio::net::TcpListener::bind(settings.bind.as_str()).await {
        Ok(l) => l,
        Err(e) => {
            error!(bind = %settings.bind, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(bind = %settings.bind, "viewer running at http://{}", settings.bind);
    info!(backend = %settings.backend_url, "NLP backend");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
