// ABOUTME: Recognition orchestrator turning a food photo into a macro estimate
// ABOUTME: Classifies, normalizes the top label, estimates macros, or returns the fallback result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Food photo recognition
//!
//! Recognition has exactly two outcomes. Either the classifier answers with
//! at least one label, and the top label is normalized and estimated, or the
//! result is [`RecognitionResult::fallback`]. Classifier failures are logged
//! and never surface as errors. There is no retry.

use crate::external::{ClassifierLabel, FoodClassifier};
use crate::logging::AppLogger;
use crate::nutrition::{estimate, normalize, ReferenceFoodTable};
use bytes::Bytes;
use macrolens_core::constants::recognition::UNKNOWN_LABEL;
use macrolens_core::models::{NutritionProfile, RecognitionResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Macro estimate for a manually entered food name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEstimate {
    /// Normalized display name
    pub food_name: String,
    /// Estimated macros for one serving
    #[serde(flatten)]
    pub nutrition: NutritionProfile,
}

/// Recognition orchestrator
pub struct FoodRecognizer {
    classifier: Arc<dyn FoodClassifier>,
    table: Arc<ReferenceFoodTable>,
}

impl FoodRecognizer {
    /// Create a recognizer over `classifier` and `table`
    pub fn new(classifier: Arc<dyn FoodClassifier>, table: Arc<ReferenceFoodTable>) -> Self {
        Self { classifier, table }
    }

    /// Reference table used for normalization and estimates
    #[must_use]
    pub fn table(&self) -> &ReferenceFoodTable {
        &self.table
    }

    /// Recognize the food in `image`
    ///
    /// Never fails: any classifier failure or an empty label list yields the
    /// fallback result.
    pub async fn recognize_food(&self, image: Bytes) -> RecognitionResult {
        let started = Instant::now();
        let image_bytes = image.len();

        let result = match self.classifier.classify(image).await {
            Ok(labels) => {
                if let Some(top) = labels.first() {
                    self.result_from_label(top)
                } else {
                    warn!(image_bytes, "Classifier returned no labels");
                    RecognitionResult::fallback()
                }
            }
            Err(error) => {
                warn!(image_bytes, error = %error, "Food classification failed");
                RecognitionResult::fallback()
            }
        };

        AppLogger::log_recognition(
            &result.food_name,
            result.confidence,
            result.is_fallback(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        result
    }

    /// Build the result for the classifier's top label
    ///
    /// A missing label reads as `"unknown food"`, a missing or non-finite
    /// score as 0, and the score is clamped into `[0, 1]`.
    #[must_use]
    pub fn result_from_label(&self, top: &ClassifierLabel) -> RecognitionResult {
        let raw_label = top.label.as_deref().unwrap_or(UNKNOWN_LABEL);
        let confidence = top
            .score
            .filter(|score| score.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);

        let food_name = normalize(&self.table, raw_label);
        let nutrition = estimate(&self.table, &food_name);
        RecognitionResult::recognized(food_name, confidence, nutrition)
    }

    /// Estimate a manually entered food name
    #[must_use]
    pub fn estimate_by_name(&self, name: &str) -> FoodEstimate {
        let food_name = normalize(&self.table, name.trim());
        let nutrition = estimate(&self.table, &food_name);
        FoodEstimate {
            food_name,
            nutrition,
        }
    }
}
