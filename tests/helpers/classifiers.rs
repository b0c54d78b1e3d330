// ABOUTME: Scripted food classifiers for integration tests
// ABOUTME: Return fixed labels or fixed errors without any network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use async_trait::async_trait;
use bytes::Bytes;
use macrolens_server::external::{ClassifierError, ClassifierLabel, FoodClassifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Classifier that always answers with the same labels
pub struct ScriptedClassifier {
    labels: Vec<ClassifierLabel>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedClassifier {
    pub fn new(labels: Vec<ClassifierLabel>) -> Self {
        Self {
            labels,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Single top label
    #[allow(dead_code)]
    pub fn top(label: &str, score: f64) -> Self {
        Self::new(vec![ClassifierLabel::new(label, score)])
    }

    /// Shared call counter
    #[allow(dead_code)]
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl FoodClassifier for ScriptedClassifier {
    async fn classify(&self, _image: Bytes) -> Result<Vec<ClassifierLabel>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.labels.clone())
    }
}

/// Classifier whose service is always down
#[allow(dead_code)]
pub struct UnavailableClassifier;

#[async_trait]
impl FoodClassifier for UnavailableClassifier {
    async fn classify(&self, _image: Bytes) -> Result<Vec<ClassifierLabel>, ClassifierError> {
        Err(ClassifierError::Status {
            status: 503,
            body: "model is loading".to_owned(),
        })
    }
}
