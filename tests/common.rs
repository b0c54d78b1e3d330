// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds in-memory server resources and registers test users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `macrolens_server`

use macrolens_server::{
    auth::{IdentityProvider, MemoryIdentityProvider},
    config::environment::ServerConfig,
    context::ServerResources,
    external::FoodClassifier,
    nutrition::ReferenceFoodTable,
    server,
    store::{MemoryTableStore, TableStore},
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Low bcrypt cost so registration stays fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Default password used by [`register_and_login`]
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Resources backed by in-memory auth and storage
pub fn create_test_resources(classifier: Arc<dyn FoodClassifier>) -> Arc<ServerResources> {
    init_test_logging();
    let identity: Arc<dyn IdentityProvider> =
        Arc::new(MemoryIdentityProvider::with_cost(TEST_BCRYPT_COST));
    let store: Arc<dyn TableStore> = Arc::new(MemoryTableStore::new());

    Arc::new(ServerResources::new(
        ServerConfig::default(),
        identity,
        store,
        classifier,
        ReferenceFoodTable::builtin(),
    ))
}

/// Full router with every middleware layer
pub fn create_test_app(resources: &Arc<ServerResources>) -> axum::Router {
    server::build_router(resources)
}

/// Register a user and return a bearer token for them
pub async fn register_and_login(resources: &ServerResources, email: &str) -> String {
    resources
        .identity
        .sign_up(email, TEST_PASSWORD)
        .await
        .unwrap();

    resources
        .identity
        .sign_in(email, TEST_PASSWORD)
        .await
        .unwrap()
        .access_token
}
