// ABOUTME: Maps noisy food-classifier labels to canonical display names
// ABOUTME: Falls back to a title-cased copy of the label when no reference food matches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::ReferenceFoodTable;

/// Map a classifier label to a display name
///
/// A matching reference key is returned title-cased (`"granny_smith_apple"`
/// gives `"Apple"`). Otherwise underscores become spaces and the label is
/// title-cased (`"pad_thai"` gives `"Pad Thai"`), which will usually miss the
/// table again in [`super::estimate`].
#[must_use]
pub fn normalize(table: &ReferenceFoodTable, raw_label: &str) -> String {
    table.best_match(raw_label).map_or_else(
        || title_case(&raw_label.replace('_', " ")),
        title_case,
    )
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest
///
/// Digits and punctuation end a run, so `"xyz123abc"` becomes `"Xyz123Abc"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}
