// ABOUTME: Client for the managed backend's REST auth service
// ABOUTME: Sign-up, password grant and token introspection over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::IdentityProvider;
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{AuthSession, AuthenticatedUser};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

const SERVICE: &str = "auth service";

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteUser {
    fn into_user(self, fallback_email: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: self.id,
            email: self.email.unwrap_or_else(|| fallback_email.to_owned()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: RemoteUser,
}

/// Managed auth service client
///
/// Talks to `{base_url}/auth/v1/*`, sending the service key as `apikey`.
#[derive(Clone)]
pub struct RemoteIdentityProvider {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RemoteIdentityProvider {
    /// Create a client for `base_url`
    pub fn new(client: Client, base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            service_key: service_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    async fn error_message(response: Response) -> String {
        let body: Value = response.json().await.unwrap_or(Value::Null);
        ["msg", "error_description", "message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .unwrap_or("request rejected")
            .to_owned()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let response = self
            .client
            .post(self.url("signup"))
            .header("apikey", &self.service_key)
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(if message.to_lowercase().contains("already") {
                AppError::already_exists(format!("User {email}"))
            } else if status.is_client_error() {
                AppError::invalid_input(message)
            } else {
                AppError::external_service(SERVICE, format!("HTTP {status}: {message}"))
            });
        }

        // Sign-up answers either with the user or with a session wrapping it
        let mut body: Value = response
            .json()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("JSON parse error: {e}")))?;
        let user_value = if body.get("user").is_some_and(Value::is_object) {
            body["user"].take()
        } else {
            body
        };

        let user: RemoteUser = serde_json::from_value(user_value)
            .map_err(|e| AppError::external_service(SERVICE, format!("unexpected sign-up body: {e}")))?;
        Ok(user.into_user(email))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let response = self
            .client
            .post(self.url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.service_key)
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE, e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(AppError::external_service(
                SERVICE,
                format!("HTTP {status}: {message}"),
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("JSON parse error: {e}")))?;
        Ok(AuthSession::bearer(token.access_token, token.user.into_user(email)))
    }

    async fn verify_token(&self, access_token: &str) -> AppResult<AuthenticatedUser> {
        let response = self
            .client
            .get(self.url("user"))
            .header("apikey", &self.service_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE, e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let user: RemoteUser = response.json().await.map_err(|e| {
                    AppError::external_service(SERVICE, format!("JSON parse error: {e}"))
                })?;
                Ok(user.into_user(""))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                Err(AppError::auth_invalid("Invalid or expired token"))
            }
            status => Err(AppError::external_service(SERVICE, format!("HTTP {status}"))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "remote"
    }
}
