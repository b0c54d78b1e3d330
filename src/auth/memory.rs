// ABOUTME: In-process identity provider with bcrypt password hashes and opaque tokens
// ABOUTME: Used when no managed auth service is configured and throughout the tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::IdentityProvider;
use dashmap::DashMap;
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{AuthSession, AuthenticatedUser};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredIdentity {
    user: AuthenticatedUser,
    password_hash: String,
}

/// In-process identity provider
///
/// Identities live for the lifetime of the process. Each user holds at most
/// one token: signing in again revokes the previous one. Emails are compared
/// case-insensitively.
#[derive(Clone)]
pub struct MemoryIdentityProvider {
    users: Arc<DashMap<String, StoredIdentity>>,
    tokens: Arc<DashMap<String, AuthenticatedUser>>,
    /// Current token per user id
    sessions: Arc<DashMap<String, String>>,
    cost: u32,
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIdentityProvider {
    /// Provider hashing with `bcrypt::DEFAULT_COST`
    #[must_use]
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Provider hashing with a custom bcrypt cost (tests use the minimum)
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            tokens: Arc::new(DashMap::new()),
            sessions: Arc::new(DashMap::new()),
            cost,
        }
    }
}

async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

#[async_trait::async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let key = email.trim().to_lowercase();
        if self.users.contains_key(&key) {
            return Err(AppError::already_exists(format!("User {key}")));
        }

        let password_hash = hash_password(password, self.cost).await?;
        let user = AuthenticatedUser {
            id: Uuid::new_v4().to_string(),
            email: key.clone(),
        };

        match self.users.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                Err(AppError::already_exists(format!("User {}", entry.key())))
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(StoredIdentity {
                    user: user.clone(),
                    password_hash,
                });
                Ok(user)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let key = email.trim().to_lowercase();
        let stored = self
            .users
            .get(&key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        if !verify_password(password, &stored.password_hash).await {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), stored.user.clone());
        if let Some(previous) = self.sessions.insert(stored.user.id.clone(), token.clone()) {
            self.tokens.remove(&previous);
        }
        Ok(AuthSession::bearer(token, stored.user))
    }

    async fn verify_token(&self, access_token: &str) -> AppResult<AuthenticatedUser> {
        self.tokens
            .get(access_token)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::auth_invalid("Invalid or expired token"))
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
