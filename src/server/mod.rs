//! HTTP API over the NAV snapshot.

pub mod handlers;
pub mod response;

use crate::service::NavService;
use anyhow::{Context, Result};
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct AppState {
    pub service: NavService,
    pub default_limit: usize,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/nav", get(handlers::list_funds))
        .route("/nav/{serial_number}", get(handlers::get_fund))
        .route("/search", get(handlers::search_funds))
        .route("/autocomplete", get(handlers::autocomplete))
        .route("/fund-houses", get(handlers::list_fund_houses))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API on an already bound listener until Ctrl-C.
pub async fn serve_on(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let local_addr = listener.local_addr()?;
    info!("Serving NAV API on http://{local_addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

pub async fn serve(bind: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    serve_on(listener, state).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
