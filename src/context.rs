// ABOUTME: Centralized resource container for dependency injection into route groups
// ABOUTME: Holds the configuration and the shared identity, store and recognition collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! # Server Resources
//!
//! Collaborators are built once at startup and shared through `Arc`. There are
//! no process-global clients.

use crate::auth::{IdentityProvider, MemoryIdentityProvider, RemoteIdentityProvider};
use crate::config::environment::ServerConfig;
use crate::external::{FoodClassifier, HttpFoodClassifier};
use crate::nutrition::ReferenceFoodTable;
use crate::services::FoodRecognizer;
use crate::store::{MemoryTableStore, RestTableStore, TableStore};
use crate::utils::http_client;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Identity provider
    pub identity: Arc<dyn IdentityProvider>,
    /// Table store
    pub store: Arc<dyn TableStore>,
    /// Recognition orchestrator
    pub recognizer: Arc<FoodRecognizer>,
}

impl ServerResources {
    /// Assemble resources from already built collaborators
    #[must_use]
    pub fn new(
        config: ServerConfig,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn TableStore>,
        classifier: Arc<dyn FoodClassifier>,
        table: ReferenceFoodTable,
    ) -> Self {
        Self {
            config: Arc::new(config),
            identity,
            store,
            recognizer: Arc::new(FoodRecognizer::new(classifier, Arc::new(table))),
        }
    }

    /// Build every collaborator from configuration
    ///
    /// The managed backend is used when `BACKEND_URL` and
    /// `BACKEND_SERVICE_KEY` are both set, in-memory implementations otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured reference food table cannot be loaded
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let table = match &config.food_table_path {
            Some(path) => {
                let table = ReferenceFoodTable::from_path(path)
                    .with_context(|| format!("Failed to load food table {}", path.display()))?;
                info!(path = %path.display(), foods = table.len(), "Loaded reference food table");
                table
            }
            None => ReferenceFoodTable::builtin(),
        };

        let (identity, store): (Arc<dyn IdentityProvider>, Arc<dyn TableStore>) =
            if let Some((url, key)) = config.backend.credentials() {
                let client = http_client::backend_client();
                info!(backend = %url, "Using managed backend for auth and storage");
                (
                    Arc::new(RemoteIdentityProvider::new(client.clone(), url, key)),
                    Arc::new(RestTableStore::new(client, url, key)),
                )
            } else {
                warn!("No managed backend configured: using in-memory auth and storage");
                (
                    Arc::new(MemoryIdentityProvider::new()),
                    Arc::new(MemoryTableStore::new()),
                )
            };

        let classifier = Arc::new(HttpFoodClassifier::new(
            http_client::classifier_client(config.classifier.timeout),
            &config.classifier,
        ));

        Ok(Self::new(config, identity, store, classifier, table))
    }
}
