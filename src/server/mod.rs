//! HTTP server for the shopping assistant API.
//!
//! Provides REST endpoints for:
//! - Chat turns (`POST /chat`)
//! - Profile-based recommendations (`POST /recommend`)
//! - Health (`GET /health`)

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::errors::AssistantResult;

/// API router wrapped in permissive CORS and per-request tracing.
#[must_use]
pub fn build_app(state: Arc<AppState>) -> Router {
    create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until `shutdown_signal` completes.
///
/// In-flight requests finish before this returns.
///
/// # Errors
/// Returns [`crate::errors::AssistantError::Server`] if the address cannot be
/// bound or the accept loop fails.
pub async fn serve<F>(
    state: Arc<AppState>,
    config: &ServerConfig,
    shutdown_signal: F,
) -> AssistantResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(
        "Shopping assistant ({} products) listening on http://{}",
        state.assistant.catalog().len(),
        listener.local_addr()?
    );

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server stopped");
    Ok(())
}
