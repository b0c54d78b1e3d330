// ABOUTME: Food entry models and the food photo recognition result
// ABOUTME: FoodEntry as stored, FoodEntryCreate as submitted, RecognitionResult with its fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::NutritionProfile;
use crate::constants::recognition;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A logged food entry as held by the table store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Store-assigned identifier
    pub id: i64,
    /// Owner identity
    pub user_id: String,
    /// Display name of the food
    pub food_name: String,
    /// Macros of the logged serving
    #[serde(flatten)]
    pub nutrition: NutritionProfile,
    /// Free-text serving size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    /// Photo URL, when one was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Day the food was eaten
    pub entry_date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Request body for logging a food entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntryCreate {
    /// Display name of the food
    pub food_name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fats: f64,
    /// Free-text serving size
    #[serde(default)]
    pub serving_size: Option<String>,
    /// Photo URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Day the food was eaten, today (UTC) when absent
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
}

impl FoodEntryCreate {
    /// Macros of the submitted entry
    #[must_use]
    pub const fn nutrition(&self) -> NutritionProfile {
        NutritionProfile::new(self.calories, self.protein, self.carbs, self.fats)
    }

    /// Validate the submitted values
    ///
    /// # Errors
    ///
    /// Returns an error if the food name is blank or any macro is negative or non-finite
    pub fn validate(&self) -> AppResult<()> {
        if self.food_name.trim().is_empty() {
            return Err(AppError::invalid_input("food_name must not be empty"));
        }
        self.nutrition().validate()
    }
}

/// Outcome of recognizing one food photo
///
/// Either built from the classifier's top label, or the fixed fallback
/// returned whenever classification could not be completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Display name of the recognized food
    pub food_name: String,
    /// Classifier confidence in `[0, 1]`
    pub confidence: f64,
    /// Estimated macros for one serving
    #[serde(flatten)]
    pub nutrition: NutritionProfile,
    /// Serving the macros refer to
    pub serving_size: String,
    /// Explanation shown to the user, set on the fallback result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RecognitionResult {
    /// Result for a recognized food
    #[must_use]
    pub fn recognized(
        food_name: impl Into<String>,
        confidence: f64,
        nutrition: NutritionProfile,
    ) -> Self {
        Self {
            food_name: food_name.into(),
            confidence,
            nutrition,
            serving_size: recognition::DEFAULT_SERVING_SIZE.to_owned(),
            note: None,
        }
    }

    /// The fixed payload returned when recognition fails
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            food_name: recognition::FALLBACK_FOOD_NAME.to_owned(),
            confidence: recognition::FALLBACK_CONFIDENCE,
            nutrition: recognition::FALLBACK_NUTRITION,
            serving_size: recognition::DEFAULT_SERVING_SIZE.to_owned(),
            note: Some(recognition::FALLBACK_NOTE.to_owned()),
        }
    }

    /// Whether this is the fallback payload
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}
