// ABOUTME: HTTP server assembly and lifecycle
// ABOUTME: Merges route groups, applies CORS, body limit, request id and tracing layers, serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use crate::context::ServerResources;
use crate::middleware::{create_request_span, setup_cors, RequestIdGenerator};
use crate::routes::{AuthRoutes, DashboardRoutes, FoodRoutes, GoalsRoutes, HealthRoutes};
use anyhow::{Context, Result};
use axum::{body::Body, extract::DefaultBodyLimit, http::Response, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Span};

/// Build the application router with every route group and layer
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let config = &resources.config;

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(FoodRoutes::routes(resources.clone()))
        .merge(DashboardRoutes::routes(resources.clone()))
        .merge(GoalsRoutes::routes(resources.clone()))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(setup_cors(&config.cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(create_request_span::<Body>)
                .on_response(|response: &Response<_>, latency: Duration, _span: &Span| {
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(status, latency_ms = %latency.as_millis(), "Request failed with server error");
                    } else {
                        tracing::info!(status, latency_ms = %latency.as_millis(), "Request completed");
                    }
                }),
        )
        .layer(SetRequestIdLayer::x_request_id(RequestIdGenerator))
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    let local = listener.local_addr().context("Listener has no local address")?;

    info!(
        address = %local,
        backend = resources.store.backend_name(),
        identity = resources.identity.provider_name(),
        "Macrolens API listening"
    );

    axum::serve(listener, build_router(&resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
