// ABOUTME: Per-serving macro estimate for a food name
// ABOUTME: Looks the name up in the reference table, with a generic estimate for unknown foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::ReferenceFoodTable;
use macrolens_core::constants::recognition::UNKNOWN_FOOD_ESTIMATE;
use macrolens_core::models::NutritionProfile;

/// Estimate the macros of one serving of `food_name`
///
/// Matching is independent of [`super::normalize`], so raw manual text works
/// as well as a normalized classifier label. Unknown foods get
/// [`UNKNOWN_FOOD_ESTIMATE`]. The returned profile is an owned copy.
#[must_use]
pub fn estimate(table: &ReferenceFoodTable, food_name: &str) -> NutritionProfile {
    table
        .best_match(food_name)
        .and_then(|key| table.get(key))
        .unwrap_or(UNKNOWN_FOOD_ESTIMATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_known_food() {
        let table = ReferenceFoodTable::builtin();
        assert_eq!(
            estimate(&table, "Banana"),
            NutritionProfile::new(105.0, 1.3, 27.0, 0.4)
        );
        assert_eq!(
            estimate(&table, "grilled salmon fillet"),
            NutritionProfile::new(206.0, 22.0, 0.0, 12.0)
        );
    }

    #[test]
    fn test_estimate_unknown_food_uses_default() {
        let table = ReferenceFoodTable::builtin();
        assert_eq!(
            estimate(&table, "Croque Monsieur"),
            NutritionProfile::new(100.0, 5.0, 15.0, 2.0)
        );
    }

    #[test]
    fn test_estimate_always_complete_and_non_negative() {
        let table = ReferenceFoodTable::builtin();
        for name in ["", " ", "apple", "???", "Xyz123", "ЯБЛОКО", "egg-white omelette"] {
            let profile = estimate(&table, name);
            for (_, value) in profile.fields() {
                assert!(value >= 0.0 && value.is_finite(), "{name:?} gave {profile:?}");
            }
        }
    }

    #[test]
    fn test_estimate_returns_isolated_copies() {
        let table = ReferenceFoodTable::builtin();
        let mut first = estimate(&table, "apple");
        first.calories = 9999.0;
        first.protein += 100.0;

        let second = estimate(&table, "apple");
        assert_eq!(second, NutritionProfile::new(95.0, 0.5, 25.0, 0.3));
        assert_eq!(table.get("apple"), Some(second));
    }
}
