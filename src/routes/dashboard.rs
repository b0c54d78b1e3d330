// ABOUTME: Dashboard route handlers for the daily macro summary
// ABOUTME: Aggregates a day's entries against stored or default goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::DateQuery;
use crate::auth::authenticate;
use crate::context::ServerResources;
use crate::services::food_log;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use macrolens_core::errors::AppError;
use macrolens_core::models::MacroSummary;
use std::sync::Arc;

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create `/dashboard/*` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/dashboard/summary", get(Self::handle_summary))
            .with_state(resources)
    }

    /// Handle daily summary request
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Json<MacroSummary>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;
        let summary =
            food_log::daily_summary(resources.store.as_ref(), &user.id, query.day()?).await?;
        Ok(Json(summary))
    }
}
