// ABOUTME: Food image classification client for a hosted inference endpoint
// ABOUTME: Sends image bytes and returns the top-ranked label, with typed failure modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Food image classifier
//!
//! The endpoint receives one image and answers with a JSON array of
//! `{"label": .., "score": ..}` objects ranked best first:
//!
//! ```text
//! POST <endpoint>
//! Content-Type: application/octet-stream        (raw transport)
//! Authorization: Bearer <key>                   (optional)
//!
//! [{"label": "banana_bread", "score": 0.82}, {"label": "muffin", "score": 0.07}]
//! ```
//!
//! With the base64 JSON transport the body is `{"inputs": "<base64 image>"}`.
//!
//! Only the top entry is read. Lower-ranked entries are never decoded, so a
//! malformed tail does not discard a usable top label.

use crate::config::environment::{ClassifierConfig, ClassifierTransport};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// One ranked label
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassifierLabel {
    /// Raw label text
    #[serde(default)]
    pub label: Option<String>,
    /// Classifier score
    #[serde(default)]
    pub score: Option<f64>,
}

impl ClassifierLabel {
    /// Label with a score
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: Some(label.into()),
            score: Some(score),
        }
    }
}

/// Classification failure
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classification timed out after {0:?}")]
    Timeout(Duration),

    #[error("classification request failed: {0}")]
    Transport(String),

    #[error("classifier answered HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed classifier response: {0}")]
    Malformed(String),
}

/// Classifies food images
#[async_trait::async_trait]
pub trait FoodClassifier: Send + Sync {
    /// Ranked labels for `image`, best first
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifierError`] for transport failures, timeouts,
    /// unsuccessful statuses and bodies that are not a label array
    async fn classify(&self, image: Bytes) -> Result<Vec<ClassifierLabel>, ClassifierError>;
}

/// HTTP classifier for hosted inference endpoints
#[derive(Clone)]
pub struct HttpFoodClassifier {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    transport: ClassifierTransport,
    timeout: Duration,
}

impl HttpFoodClassifier {
    /// Build a classifier from configuration, sharing `client`
    #[must_use]
    pub fn new(client: Client, config: &ClassifierConfig) -> Self {
        Self {
            client,
            endpoint: config.api_url.clone(),
            api_key: config.api_key.clone(),
            transport: config.transport,
            timeout: config.timeout,
        }
    }

    fn parse_labels(body: &[u8]) -> Result<Vec<ClassifierLabel>, ClassifierError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ClassifierError::Malformed(format!("not JSON: {e}")))?;
        let top = match value {
            Value::Array(entries) => entries.into_iter().next(),
            other => {
                return Err(ClassifierError::Malformed(format!(
                    "expected a label array, got {}",
                    kind(&other)
                )))
            }
        };
        let Some(top) = top else {
            return Ok(Vec::new());
        };

        let top: ClassifierLabel = serde_json::from_value(top)
            .map_err(|e| ClassifierError::Malformed(format!("bad top label: {e}")))?;
        Ok(vec![top])
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait::async_trait]
impl FoodClassifier for HttpFoodClassifier {
    async fn classify(&self, image: Bytes) -> Result<Vec<ClassifierLabel>, ClassifierError> {
        let mut request = self.client.post(&self.endpoint).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        request = match self.transport {
            ClassifierTransport::Raw => request
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(image),
            ClassifierTransport::Base64Json => {
                request.json(&json!({"inputs": STANDARD.encode(&image)}))
            }
        };

        debug!(endpoint = %self.endpoint, transport = ?self.transport, "Classifying food image");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(self.timeout)
            } else {
                ClassifierError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(self.timeout)
            } else {
                ClassifierError::Transport(e.to_string())
            }
        })?;

        if status != reqwest::StatusCode::OK {
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).chars().take(200).collect(),
            });
        }

        Self::parse_labels(&body)
    }
}
