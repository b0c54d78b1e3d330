// ABOUTME: Route module organization for the Macrolens HTTP endpoints
// ABOUTME: Route groups per domain plus shared request parsing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Route module for the Macrolens API
//!
//! Each domain module contains only route definitions and thin handler
//! functions that authenticate, parse, and delegate to [`crate::services`].

/// Registration, login and profile routes
pub mod auth;
/// Daily summary routes
pub mod dashboard;
/// Food recognition, logging and estimate routes
pub mod food;
/// Macro goal routes
pub mod goals;
/// Root and health check routes
pub mod health;

pub use auth::AuthRoutes;
pub use dashboard::DashboardRoutes;
pub use food::FoodRoutes;
pub use goals::GoalsRoutes;
pub use health::HealthRoutes;

use crate::services::food_log;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use chrono::NaiveDate;
use macrolens_core::errors::{AppError, AppResult};
use serde::Deserialize;

/// `?date=YYYY-MM-DD` query, today when absent
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DateQuery {
    #[serde(default)]
    date: Option<String>,
}

impl DateQuery {
    /// The requested day
    pub(crate) fn day(&self) -> AppResult<NaiveDate> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(food_log::today()),
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
                AppError::invalid_format(format!("date must be YYYY-MM-DD, got '{text}'"))
            }),
        }
    }
}

/// Unwrap a JSON body, turning extractor rejections into API errors
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(date: Option<&str>) -> DateQuery {
        DateQuery {
            date: date.map(str::to_owned),
        }
    }

    #[test]
    fn test_date_query_parsing() {
        assert_eq!(
            query(Some("2025-03-14")).day().ok(),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
        assert_eq!(query(None).day().ok(), Some(food_log::today()));
        assert!(query(Some("14/03/2025")).day().is_err());
        assert!(query(Some("2025-02-30")).day().is_err());
    }
}
