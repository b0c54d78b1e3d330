// ABOUTME: NutritionProfile, the four-field macro-nutrient record
// ABOUTME: Componentwise addition and validation helpers shared by entries, goals and estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Field names of the macro columns, in canonical order
pub const MACRO_FIELDS: [&str; 4] = ["calories", "protein", "carbs", "fats"];

/// Calories and macro-nutrients (grams) of a food, a serving or a day
///
/// Fields missing from input deserialize as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    /// Energy in kcal
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fats: f64,
}

impl NutritionProfile {
    /// All-zero profile
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a profile from its four components
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fats,
        }
    }

    /// Values paired with their field names, in [`MACRO_FIELDS`] order
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, f64); 4] {
        [
            (MACRO_FIELDS[0], self.calories),
            (MACRO_FIELDS[1], self.protein),
            (MACRO_FIELDS[2], self.carbs),
            (MACRO_FIELDS[3], self.fats),
        ]
    }

    /// Reject negative or non-finite components
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::out_of_range(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Add for NutritionProfile {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
        }
    }
}

impl AddAssign for NutritionProfile {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let profile: NutritionProfile =
            serde_json::from_str(r#"{"calories": 120}"#).unwrap_or_default();
        assert_eq!(profile, NutritionProfile::new(120.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_sum_is_componentwise() {
        let total: NutritionProfile = [
            NutritionProfile::new(100.0, 1.0, 2.0, 3.0),
            NutritionProfile::new(50.0, 4.0, 5.0, 6.0),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, NutritionProfile::new(150.0, 5.0, 7.0, 9.0));
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(NutritionProfile::new(1.0, 1.0, 1.0, 1.0).validate().is_ok());
        assert!(NutritionProfile::new(-1.0, 1.0, 1.0, 1.0).validate().is_err());
        assert!(NutritionProfile::new(1.0, f64::NAN, 1.0, 1.0)
            .validate()
            .is_err());
    }
}
