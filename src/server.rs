//! Local HTTP server for the dashboard
//!
//! Routes:
//! - `GET /` - the dashboard page
//! - `GET /health` - liveness probe
//! - `GET /api/aggregates` - aggregate rows as JSON (NaN averages become `null`)
//!
//! The page is rendered before the server starts and shared read-only across
//! requests. The server runs until Ctrl+C.

use crate::aggregate::AggregateRow;
use crate::config::DashboardConfig;
use crate::dashboard::DashboardPage;
use crate::error::{DashError, Result};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Shared, immutable server state
#[derive(Debug, Clone)]
pub struct AppState {
    page_html: Arc<str>,
    aggregates: Arc<Vec<AggregateRow>>,
}

impl AppState {
    /// Render `page` once for all requests
    pub fn new(page: &DashboardPage) -> Self {
        Self {
            page_html: Arc::from(page.to_html()),
            aggregates: Arc::new(page.rows().to_vec()),
        }
    }
}

/// Build the dashboard router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/aggregates", get(aggregates_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.page_html.to_string())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

async fn aggregates_handler(State(state): State<AppState>) -> Json<Vec<AggregateRow>> {
    Json(state.aggregates.as_ref().clone())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Serve `page` on the configured address until interrupted
pub fn serve(page: &DashboardPage, config: &DashboardConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| DashError::Server(format!("Failed to create runtime: {e}")))?;

    let bind_addr = config.bind_addr();
    let app = create_router(AppState::new(page));

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| DashError::Server(format!("Failed to bind {bind_addr}: {e}")))?;

        tracing::info!("Dashboard listening on http://{}", bind_addr);
        println!("Dashboard running on http://{}/ (press Ctrl+C to stop)", bind_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DashError::Server(format!("Server error: {e}")))?;

        tracing::info!("Dashboard stopped");
        Ok(())
    })
}
