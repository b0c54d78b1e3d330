// ABOUTME: Authentication route handlers for registration, login and the current user
// ABOUTME: Delegates to the account service over the configured identity provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::json_body;
use crate::auth::authenticate;
use crate::context::ServerResources;
use crate::services::accounts;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use macrolens_core::errors::AppError;
use macrolens_core::models::{
    AuthSession, LoginRequest, RegisterRequest, RegisterResponse, UserProfile,
};
use std::sync::Arc;

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create `/auth/*` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<RegisterRequest>, JsonRejection>,
    ) -> Result<Json<RegisterResponse>, AppError> {
        let request = json_body(payload)?;
        let response =
            accounts::register(resources.identity.as_ref(), resources.store.as_ref(), request)
                .await?;
        Ok(Json(response))
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Json<AuthSession>, AppError> {
        let request = json_body(payload)?;
        let session = accounts::login(resources.identity.as_ref(), request).await?;
        Ok(Json(session))
    }

    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<UserProfile>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;
        let profile = accounts::profile(resources.store.as_ref(), &user).await?;
        Ok(Json(profile))
    }
}
