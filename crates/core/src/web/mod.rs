//! HTTP front end
//!
//! One page (`GET /`) plus one POST route per form action. Actions redirect
//! back to the page so every interaction ends in a full reload from fresh
//! query results.

pub mod handlers;
pub mod page;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{db::PromptStore, errors::Result};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PromptStore>,
}

/// Build the application router over any store
pub fn router(store: Arc<dyn PromptStore>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/prompts", post(handlers::create))
        .route("/prompts/{id}", post(handlers::update))
        .route("/prompts/{id}/favorite", post(handlers::toggle_favorite))
        .route("/prompts/{id}/delete", post(handlers::delete))
        .route("/prompts/{id}/render", post(handlers::render))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

/// Serve until Ctrl-C
pub async fn serve(addr: SocketAddr, store: Arc<dyn PromptStore>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Promptbase listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
