//! Application builder: wires stores, services, and the router, then serves.

use axum::Router;

use vault_core::config::AppConfig;
use vault_core::error::AppError;
use vault_database::Stores;
use vault_service::build_completion_client;
use vault_storage::build_blob_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the FileVault server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FileVault v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Metadata stores ──────────────────────────────────
    let stores = Stores::connect(&config.database).await?;

    // ── Step 2: Blob store ───────────────────────────────────────
    let blobs = build_blob_store(&config.storage).await?;

    // ── Step 3: LLM client ───────────────────────────────────────
    let completion = build_completion_client(&config.llm)?;
    tracing::info!(enabled = config.llm.enabled, model = %config.llm.model, "Completion client ready");

    // ── Step 4: Services and router ──────────────────────────────
    let addr = config.server.bind_address();
    let state = AppState::new(config, stores.clone(), blobs, completion)?;
    let app = build_app(state);

    // ── Step 5: Serve with graceful shutdown ─────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("FileVault server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    stores.close().await;
    tracing::info!("FileVault server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
