// ABOUTME: Root and health check route handlers for service monitoring
// ABOUTME: Liveness of the server and reachability of the table store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Health check routes for service monitoring
//!
//! `/health/db` always answers 200 and reports the store state in the body.

use crate::context::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use macrolens_core::constants::service_names;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create root and health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .route("/health/db", get(Self::handle_db_health))
            .with_state(resources)
    }

    async fn handle_root() -> Json<Value> {
        Json(json!({
            "message": service_names::API_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_db_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        match resources.store.ping().await {
            Ok(()) => Json(json!({
                "status": "healthy",
                "database": "connected",
                "backend": resources.store.backend_name(),
            })),
            Err(error) => {
                warn!(backend = resources.store.backend_name(), error = %error, "Table store health check failed");
                Json(json!({
                    "status": "unhealthy",
                    "database": "error",
                    "error": error.message,
                }))
            }
        }
    }
}
