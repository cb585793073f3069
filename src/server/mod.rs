//! HTTP server for the quick action dispatcher.
//!
//! This module implements the HTTP server that:
//! - Accepts webhooks from GitHub and runs their quick actions before replying
//! - Provides health checks for liveness probes
//!
//! # Endpoints
//!
//! - `POST <listen path>` (default `/api/v1/webhook`) - GitHub webhook deliveries
//! - `GET /health` - Returns 200 if server is running
//!
//! Signatures are not verified here; run behind something that does.

use anyhow::Context;
use axum::routing::{get, post};
use tracing::{info, warn};

use crate::actions::ActionRegistry;
use crate::config::Config;
use crate::dispatch::Dispatcher;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::{WebhookError, webhook_handler};

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        AppState { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Builds the axum Router with all endpoints.
///
/// `listen_path` must start with `/`.
pub fn build_router(app_state: AppState, listen_path: &str) -> axum::Router {
    axum::Router::new()
        .route(listen_path, post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}

/// Serves `registry` until Ctrl-C, then drains in-flight deliveries.
pub async fn serve(config: &Config, registry: ActionRegistry) -> anyhow::Result<()> {
    if registry.is_empty() {
        warn!("No quick action registered, every delivery will be acknowledged and ignored");
    }
    let dispatcher = Dispatcher::new(registry);
    info!(handles = ?dispatcher.handles(), "Quick actions registered");

    let app = build_router(AppState::new(dispatcher), &config.listen_path);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(
        addr = %config.listen_addr,
        path = %config.listen_path,
        "Listening for webhooks"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received, draining in-flight deliveries");
        })
        .await
        .context("webhook server exited unexpectedly")
}
