// ABOUTME: Main library entry point for the Macrolens nutrition API
// ABOUTME: Food photo recognition, food logging and daily macro tracking over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

#![deny(unsafe_code)]

//! # Macrolens Server
//!
//! A backend-for-frontend that lets a user upload a food photo for a macro
//! estimate, log food entries, and track daily totals against goals.
//! Identity and storage are delegated to a managed backend, image
//! classification to a hosted inference endpoint.
//!
//! ## Architecture
//!
//! - **Nutrition**: reference food table, label normalizer, macro estimator
//!   and macro aggregator. Pure and synchronous.
//! - **Services**: the recognition orchestrator, food logging, goals and
//!   account flows.
//! - **Collaborators**: [`auth::IdentityProvider`], [`store::TableStore`] and
//!   [`external::FoodClassifier`], each with a remote and a test-friendly
//!   implementation.
//! - **Routes**: axum route groups built from [`context::ServerResources`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use macrolens_server::config::environment::ServerConfig;
//! use macrolens_server::context::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config)?);
//!     macrolens_server::server::run(resources).await
//! }
//! ```

/// Identity providers and bearer authentication
pub mod auth;

/// Environment configuration
pub mod config;

/// Shared server resources
pub mod context;

/// Clients for external APIs
pub mod external;

/// Logging setup and structured log helpers
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Reference table, normalizer, estimator and aggregator
pub mod nutrition;

/// HTTP route groups
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Business logic behind the routes
pub mod services;

/// Table store abstraction and backends
pub mod store;

/// Shared utilities
pub mod utils;

/// Core types re-exported from `macrolens-core`
pub use macrolens_core::{constants, errors, models};
