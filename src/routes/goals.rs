// ABOUTME: Macro goal route handlers
// ABOUTME: Reads stored goals (or defaults) and upserts new targets

use super::json_body;
use crate::auth::authenticate;
use crate::context::ServerResources;
use crate::services::goals;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use macrolens_core::errors::AppError;
use macrolens_core::models::{MacroGoals, MacroTargets};
use std::sync::Arc;

/// Macro goal routes
pub struct GoalsRoutes;

impl GoalsRoutes {
    /// Create `/macro-goals` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/macro-goals",
                get(Self::handle_get_goals).post(Self::handle_update_goals),
            )
            .with_state(resources)
    }

    async fn handle_get_goals(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<MacroGoals>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;
        Ok(Json(goals::get_goals(resources.store.as_ref(), &user.id).await?))
    }

    async fn handle_update_goals(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<MacroTargets>, JsonRejection>,
    ) -> Result<Json<MacroGoals>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;
        let targets = json_body(payload)?;
        Ok(Json(
            goals::upsert_goals(resources.store.as_ref(), &user.id, targets).await?,
        ))
    }
}
