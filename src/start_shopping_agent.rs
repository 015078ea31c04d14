//! Startup helpers for the shopping assistant server.

use std::process::ExitCode;
use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::errors::AssistantResult;
use crate::server::{self, AppState};

/// Run the server until Ctrl-C (used by the `shopping-agent-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting shopping assistant v{}", env!("CARGO_PKG_VERSION"));

    let (config, state) = match initialize() {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::serve(state, &config.server, shutdown_signal())) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Read configuration and build application state without serving.
///
/// # Errors
/// Returns an error if configuration is missing or invalid, or the catalog
/// cannot be loaded.
pub fn initialize() -> AssistantResult<(AssistantConfig, Arc<AppState>)> {
    let config = AssistantConfig::from_env()?;
    tracing::info!("Catalog: {}", config.catalog.path.display());
    let state = AppState::new(&config)?;
    Ok((config, state))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
