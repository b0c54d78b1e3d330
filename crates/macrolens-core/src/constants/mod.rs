// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Default macro goals, recognition fallback values, and table names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being kept in a
//! single flat list.

/// Default daily macro goals used when a user has none on file
pub mod goals {
    /// Daily calorie goal (kcal)
    pub const DEFAULT_CALORIE_GOAL: f64 = 2000.0;
    /// Daily protein goal (g)
    pub const DEFAULT_PROTEIN_GOAL: f64 = 150.0;
    /// Daily carbohydrate goal (g)
    pub const DEFAULT_CARB_GOAL: f64 = 200.0;
    /// Daily fat goal (g)
    pub const DEFAULT_FAT_GOAL: f64 = 65.0;
}

/// Food recognition values
pub mod recognition {
    use crate::models::NutritionProfile;

    /// Serving size reported for every recognition result
    pub const DEFAULT_SERVING_SIZE: &str = "1 serving";

    /// Label used when the classifier omits one
    pub const UNKNOWN_LABEL: &str = "unknown food";

    /// Food name of the fallback result
    pub const FALLBACK_FOOD_NAME: &str = "Unknown Food";

    /// Confidence of the fallback result
    pub const FALLBACK_CONFIDENCE: f64 = 0.5;

    /// Macros of the fallback result
    pub const FALLBACK_NUTRITION: NutritionProfile = NutritionProfile::new(150.0, 5.0, 20.0, 3.0);

    /// Note attached to the fallback result
    pub const FALLBACK_NOTE: &str = "Unable to recognize food. Please edit manually.";

    /// Estimate for a food that is not in the reference table
    pub const UNKNOWN_FOOD_ESTIMATE: NutritionProfile = NutritionProfile::new(100.0, 5.0, 15.0, 2.0);

    /// Default classification request timeout in seconds
    pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 10;
}

/// Table names in the external store
pub mod tables {
    /// User profiles
    pub const USERS: &str = "users";
    /// Logged food entries
    pub const FOOD_ENTRIES: &str = "food_entries";
    /// Per-user macro goals
    pub const MACRO_GOALS: &str = "macro_goals";
}

/// Service identification for logs and the root endpoint
pub mod service_names {
    /// Service name
    pub const MACROLENS_SERVER: &str = "macrolens-server";
    /// Human readable API name
    pub const API_NAME: &str = "Macrolens API";
}
