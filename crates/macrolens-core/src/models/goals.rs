// ABOUTME: Daily macro goals and the derived daily views
// ABOUTME: MacroTargets, MacroGoals, MacroSummary and DailyLog definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::{FoodEntry, NutritionProfile};
use crate::constants::goals;
use crate::errors::AppResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily targets for calories and macros
///
/// Also the request body for updating goals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Calorie goal (kcal)
    pub calorie_goal: f64,
    /// Protein goal (g)
    pub protein_goal: f64,
    /// Carbohydrate goal (g)
    pub carb_goal: f64,
    /// Fat goal (g)
    pub fat_goal: f64,
}

impl Default for MacroTargets {
    fn default() -> Self {
        Self {
            calorie_goal: goals::DEFAULT_CALORIE_GOAL,
            protein_goal: goals::DEFAULT_PROTEIN_GOAL,
            carb_goal: goals::DEFAULT_CARB_GOAL,
            fat_goal: goals::DEFAULT_FAT_GOAL,
        }
    }
}

impl MacroTargets {
    /// Targets as a nutrition profile
    #[must_use]
    pub const fn as_profile(&self) -> NutritionProfile {
        NutritionProfile::new(
            self.calorie_goal,
            self.protein_goal,
            self.carb_goal,
            self.fat_goal,
        )
    }

    /// Reject negative or non-finite goals
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the offending goal
    pub fn validate(&self) -> AppResult<()> {
        self.as_profile().validate()
    }
}

/// Goals stored for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroGoals {
    /// Owner identity
    pub user_id: String,
    /// Targets
    #[serde(flatten)]
    pub targets: MacroTargets,
    /// When the goals were first stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the goals were last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MacroGoals {
    /// Default goals for a user with nothing on file
    #[must_use]
    pub fn defaults_for(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            targets: MacroTargets::default(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Totals for one day next to the goals they are tracked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSummary {
    /// Day summarized
    pub date: NaiveDate,
    /// Sum of the day's entries
    #[serde(flatten)]
    pub totals: NutritionProfile,
    /// Goals in effect
    #[serde(flatten)]
    pub goals: MacroTargets,
}

/// A day's entries with their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    /// Day shown
    pub date: NaiveDate,
    /// Entries, newest first
    pub entries: Vec<FoodEntry>,
    /// Summary of the entries
    pub totals: MacroSummary,
}
