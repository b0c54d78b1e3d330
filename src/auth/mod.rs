// ABOUTME: Identity provider abstraction and bearer token authentication for HTTP requests
// ABOUTME: Identities are issued by an external auth service and trusted as-is once verified
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

/// In-process identity provider
pub mod memory;
/// Managed auth service client
pub mod remote;

pub use memory::MemoryIdentityProvider;
pub use remote::RemoteIdentityProvider;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{AuthSession, AuthenticatedUser};

/// Issues and verifies user identities
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the email is taken, or an error
    /// from the provider
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthenticatedUser>;

    /// Exchange credentials for a session
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for unknown users or wrong passwords
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// Resolve an access token to its user
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for unknown or expired tokens
    async fn verify_token(&self, access_token: &str) -> AppResult<AuthenticatedUser>;

    /// Provider name for logs
    fn provider_name(&self) -> &'static str;
}

/// Extract the token of an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Authenticate a request by its bearer token
///
/// # Errors
///
/// Returns `AuthRequired` without a bearer token and `AuthInvalid` when the
/// provider rejects it
pub async fn authenticate(
    headers: &HeaderMap,
    identity: &dyn IdentityProvider,
) -> AppResult<AuthenticatedUser> {
    let token = bearer_token(headers).ok_or_else(AppError::auth_required)?;
    identity.verify_token(token).await.inspect_err(|e| {
        tracing::debug!(provider = identity.provider_name(), error = %e, "Token rejected");
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer   abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
