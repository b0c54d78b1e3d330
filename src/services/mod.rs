// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Recognition, food logging, goals and account flows over the injected collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Domain service layer
//!
//! Route handlers stay thin: they authenticate, parse the request and call
//! into these services, which only see the collaborator traits
//! ([`crate::store::TableStore`], [`crate::auth::IdentityProvider`],
//! [`crate::external::FoodClassifier`]).

/// Registration, login and profile lookup
pub mod accounts;

/// Food entry CRUD and daily summaries
pub mod food_log;

/// Food photo recognition orchestration
pub mod food_recognition;

/// Per-user macro goals
pub mod goals;

pub use food_recognition::{FoodEstimate, FoodRecognizer};
