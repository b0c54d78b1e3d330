// ABOUTME: Account flows on top of the identity provider and the users table
// ABOUTME: Registration with a best-effort profile row, login, and profile lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use crate::auth::IdentityProvider;
use crate::logging::AppLogger;
use crate::store::{Filter, Row, TableStore};
use chrono::{SecondsFormat, Utc};
use macrolens_core::constants::tables;
use macrolens_core::errors::{AppError, AppResult, ErrorCode};
use macrolens_core::models::{
    AuthSession, AuthenticatedUser, LoginRequest, RegisterRequest, RegisterResponse, UserProfile,
};
use serde_json::Value;
use tracing::warn;

/// Register a new account
///
/// The identity is created first. The `users` profile row is then inserted;
/// if it already exists the conflict is logged and registration still
/// succeeds.
///
/// # Errors
///
/// Returns a validation error for a malformed email or short password,
/// `ResourceAlreadyExists` for a taken email, or a store error
pub async fn register(
    identity: &dyn IdentityProvider,
    store: &dyn TableStore,
    request: RegisterRequest,
) -> AppResult<RegisterResponse> {
    request.validate()?;

    let user = identity
        .sign_up(&request.email, &request.password)
        .await
        .inspect_err(|e| {
            AppLogger::log_auth_event(&request.email, "register", false, Some(&e.message));
        })?;

    let mut profile = Row::new();
    profile.insert("id".to_owned(), Value::from(user.id.clone()));
    profile.insert("email".to_owned(), Value::from(user.email.clone()));
    profile.insert("name".to_owned(), Value::from(request.name.trim()));
    profile.insert(
        "created_at".to_owned(),
        Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
    );

    match store.insert(tables::USERS, profile).await {
        Ok(_) => {}
        Err(error) if error.code == ErrorCode::ResourceAlreadyExists => {
            warn!(user_id = %user.id, "User profile row already exists, keeping it");
        }
        Err(error) => return Err(error),
    }

    AppLogger::log_auth_event(&user.id, "register", true, None);
    Ok(RegisterResponse {
        message: "User registered successfully".to_owned(),
        user_id: user.id,
        email: user.email,
    })
}

/// Log in with email and password
///
/// # Errors
///
/// Returns `AuthInvalid` for wrong credentials
pub async fn login(identity: &dyn IdentityProvider, request: LoginRequest) -> AppResult<AuthSession> {
    request.validate()?;

    match identity.sign_in(&request.email, &request.password).await {
        Ok(session) => {
            AppLogger::log_auth_event(&session.user.id, "login", true, None);
            Ok(session)
        }
        Err(error) => {
            AppLogger::log_auth_event(&request.email, "login", false, Some(&error.message));
            Err(error)
        }
    }
}

/// Profile row of the authenticated user
///
/// # Errors
///
/// Returns `ResourceNotFound` when no profile row exists
pub async fn profile(store: &dyn TableStore, user: &AuthenticatedUser) -> AppResult<UserProfile> {
    let row = store
        .select(tables::USERS, &[Filter::eq("id", user.id.as_str())], None)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found("User profile"))?;

    Ok(serde_json::from_value(Value::Object(row))?)
}
