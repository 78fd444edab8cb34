//! HTTP server lifecycle: bind the configured address, mount the router,
//! run until a shutdown signal arrives.

use tokio::signal;

use crate::api::router::clinic_router;
use crate::api::types::ApiContext;
use crate::config::Config;

/// Bind and serve until ctrl-c. Runs in the foreground; request-level
/// failures are handled per-request and never tear the server down.
pub async fn serve(ctx: ApiContext, config: &Config) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.bind_addr))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;
    tracing::info!(%addr, "Clinic API listening");

    let app = clinic_router(ctx, &config.cors_origins);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
