//! Web server assembly
//!
//! Serves the static frontend and nests the planning API under `/api`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::api::{self, AppState};
use crate::config::PlannerConfig;
use crate::gemini::GeminiClient;
use crate::planner::PlannerService;

/// Build the request handler state from configuration
///
/// A missing API key leaves the planner unconfigured so the server still
/// starts and reports 503 on plan requests.
pub fn build_state(config: &PlannerConfig) -> Result<AppState> {
    let planner = if config.gemini.api_key.is_some() {
        let client = GeminiClient::new(&config.gemini)?;
        let timeout = Duration::from_secs(config.gemini.timeout_seconds);
        Some(Arc::new(PlannerService::new(Arc::new(client), timeout)))
    } else {
        warn!("No Gemini API key configured; plan requests will fail with 503");
        None
    };

    Ok(AppState { planner })
}

/// Start the web server and block until it exits
pub async fn run(config: PlannerConfig) -> Result<()> {
    let state = build_state(&config)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new(&config.server.frontend_dir))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;
    Ok(())
}
