// ABOUTME: Reference nutrition table mapping canonical food keys to per-serving macros
// ABOUTME: Provides the shared best-match lookup used by the normalizer and the estimator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Reference nutrition table
//!
//! The table is immutable once built and is shared behind an `Arc`. Lookups
//! hand out copies of the stored profiles.
//!
//! # Matching
//!
//! [`ReferenceFoodTable::best_match`] accepts a key when the key is a
//! substring of the lowercased name or the lowercased name is a substring of
//! the key. Candidates are tried longest key first, ties in definition order,
//! so a more specific key (`"fried rice"`) always wins over a shorter one it
//! contains (`"rice"`).

use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::NutritionProfile;
use serde_json::{Map, Value};
use std::path::Path;

/// Built-in table, in definition order
const BUILTIN_FOODS: [(&str, NutritionProfile); 9] = [
    ("apple", NutritionProfile::new(95.0, 0.5, 25.0, 0.3)),
    ("banana", NutritionProfile::new(105.0, 1.3, 27.0, 0.4)),
    ("chicken breast", NutritionProfile::new(165.0, 31.0, 0.0, 3.6)),
    ("rice", NutritionProfile::new(130.0, 2.7, 28.0, 0.3)),
    ("bread", NutritionProfile::new(79.0, 3.0, 15.0, 1.0)),
    ("egg", NutritionProfile::new(70.0, 6.0, 0.6, 5.0)),
    ("salmon", NutritionProfile::new(206.0, 22.0, 0.0, 12.0)),
    ("broccoli", NutritionProfile::new(55.0, 3.7, 11.0, 0.6)),
    ("pasta", NutritionProfile::new(131.0, 5.0, 25.0, 1.1)),
];

/// Canonical food keys with per-serving macros
#[derive(Debug, Clone)]
pub struct ReferenceFoodTable {
    /// Entries in definition order
    entries: Vec<(String, NutritionProfile)>,
    /// Indices into `entries`, longest key first
    candidates: Vec<usize>,
}

impl ReferenceFoodTable {
    /// Build a table from `(key, profile)` pairs in definition order
    ///
    /// Keys are trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank or duplicate key, or a profile with a
    /// negative or non-finite value
    pub fn new<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, NutritionProfile)>,
    ) -> AppResult<Self> {
        let mut normalized: Vec<(String, NutritionProfile)> = Vec::new();

        for (key, profile) in entries {
            let key = key.as_ref().trim().to_lowercase();
            if key.is_empty() {
                return Err(AppError::invalid_input("food key must not be empty"));
            }
            if normalized.iter().any(|(existing, _)| *existing == key) {
                return Err(AppError::invalid_input(format!(
                    "duplicate food key '{key}'"
                )));
            }
            profile.validate().map_err(|e| {
                AppError::invalid_input(format!("food '{key}': {}", e.message))
            })?;
            normalized.push((key, profile));
        }

        Ok(Self::from_normalized(normalized))
    }

    /// The built-in table of common foods
    #[must_use]
    pub fn builtin() -> Self {
        let entries: Vec<(String, NutritionProfile)> = BUILTIN_FOODS
            .iter()
            .map(|(key, profile)| ((*key).to_owned(), *profile))
            .collect();
        Self::from_normalized(entries)
    }

    fn from_normalized(entries: Vec<(String, NutritionProfile)>) -> Self {
        let mut candidates: Vec<usize> = (0..entries.len()).collect();
        // stable sort: equal lengths keep definition order
        candidates.sort_by_key(|&i| std::cmp::Reverse(entries[i].0.chars().count()));
        Self {
            entries,
            candidates,
        }
    }

    /// Parse a table from `{"food key": {"calories": .., "protein": .., "carbs": .., "fats": ..}}`
    ///
    /// Object order is kept as definition order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not an object of profiles or fails
    /// the checks of [`ReferenceFoodTable::new`]
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let document: Map<String, Value> = serde_json::from_str(json).map_err(|e| {
            AppError::invalid_format(format!("food table must be a JSON object: {e}"))
        })?;

        let mut entries = Vec::with_capacity(document.len());
        for (key, value) in document {
            let profile: NutritionProfile = serde_json::from_value(value).map_err(|e| {
                AppError::invalid_format(format!("food '{key}' has an invalid profile: {e}"))
            })?;
            entries.push((key, profile));
        }

        Self::new(entries)
    }

    /// Load a table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read food table {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Find the canonical key matching `name`
    ///
    /// Returns `None` when no key is a substring of the lowercased name and the
    /// lowercased name is a substring of no key.
    #[must_use]
    pub fn best_match(&self, name: &str) -> Option<&str> {
        let needle = name.to_lowercase();
        self.candidates
            .iter()
            .map(|&i| self.entries[i].0.as_str())
            .find(|key| needle.contains(*key) || key.contains(needle.as_str()))
    }

    /// Per-serving macros for an exact canonical key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<NutritionProfile> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, profile)| *profile)
    }

    /// Canonical keys in definition order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of foods
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no foods
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReferenceFoodTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keeps_definition_order() {
        let table = ReferenceFoodTable::builtin();
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys.first(), Some(&"apple"));
        assert_eq!(keys.last(), Some(&"pasta"));
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn test_best_match_both_directions() {
        let table = ReferenceFoodTable::builtin();
        // key inside label
        assert_eq!(table.best_match("granny_smith_apple"), Some("apple"));
        // label inside key
        assert_eq!(table.best_match("Chicken"), Some("chicken breast"));
        assert_eq!(table.best_match("xyz123"), None);
    }

    #[test]
    fn test_longer_key_wins_regardless_of_order() {
        let table = ReferenceFoodTable::new([
            ("rice", NutritionProfile::new(130.0, 2.7, 28.0, 0.3)),
            ("fried rice", NutritionProfile::new(238.0, 5.5, 45.0, 4.1)),
        ])
        .unwrap();

        assert_eq!(table.best_match("Fried_Rice"), Some("fried rice"));
        assert_eq!(table.best_match("steamed rice"), Some("rice"));
    }

    #[test]
    fn test_equal_length_ties_follow_definition_order() {
        let table = ReferenceFoodTable::new([
            ("kiwi", NutritionProfile::ZERO),
            ("lime", NutritionProfile::ZERO),
        ])
        .unwrap();

        assert_eq!(table.best_match("lime and kiwi"), Some("kiwi"));
    }

    #[test]
    fn test_rejects_duplicate_and_blank_keys() {
        assert!(ReferenceFoodTable::new([
            ("Apple", NutritionProfile::ZERO),
            ("apple ", NutritionProfile::ZERO),
        ])
        .is_err());
        assert!(ReferenceFoodTable::new([("  ", NutritionProfile::ZERO)]).is_err());
    }

    #[test]
    fn test_from_json_preserves_order_and_defaults_missing_fields() {
        let table = ReferenceFoodTable::from_json_str(
            r#"{"tofu": {"calories": 94, "protein": 10}, "oats": {"calories": 150, "protein": 5, "carbs": 27, "fats": 3}}"#,
        )
        .unwrap();

        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["tofu", "oats"]);
        assert_eq!(
            table.get("tofu"),
            Some(NutritionProfile::new(94.0, 10.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(ReferenceFoodTable::from_json_str("[1, 2]").is_err());
        assert!(ReferenceFoodTable::from_json_str(r#"{"tofu": "lots"}"#).is_err());
    }
}
