// ABOUTME: Account models for registration, login and identity verification
// ABOUTME: Request bodies, session payload and the stored user profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

/// Identity issued by the identity provider and trusted as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// User identifier
    pub id: String,
    /// Email address
    pub email: String,
}

/// Session returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: String,
    /// Logged in user
    pub user: AuthenticatedUser,
}

impl AuthSession {
    /// Build a bearer session
    #[must_use]
    pub fn bearer(access_token: impl Into<String>, user: AuthenticatedUser) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_owned(),
            user,
        }
    }
}

/// Profile row kept in the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier
    pub id: String,
    /// Email address
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Registration time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address
    pub email: String,
    /// Plain text password
    pub password: String,
    /// Display name
    pub name: String,
}

impl RegisterRequest {
    /// Validate email shape and password length
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Registration response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,
    /// New user identifier
    pub user_id: String,
    /// Registered email
    pub email: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plain text password
    pub password: String,
}

impl LoginRequest {
    /// Validate email shape
    ///
    /// # Errors
    ///
    /// Returns an error if the email is malformed
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)
    }
}

/// Basic `local@domain.tld` check
fn validate_email(email: &str) -> AppResult<()> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && !email.chars().any(char::is_whitespace)
    });

    if valid {
        Ok(())
    } else {
        Err(AppError::invalid_format(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            name: "Test".to_owned(),
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register("a@example.com", "secret1").validate().is_ok());
        assert!(register("not-an-email", "secret1").validate().is_err());
        assert!(register("a@b", "secret1").validate().is_err());
        assert!(register("a@example.com", "short").validate().is_err());
    }
}
