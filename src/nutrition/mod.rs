// ABOUTME: Nutrition domain logic: reference food table, label matching and macro totals
// ABOUTME: Pure functions with no I/O, shared by recognition, manual lookup and summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! # Nutrition
//!
//! - [`ReferenceFoodTable`]: ordered canonical food keys with per-serving macros
//! - [`normalize`]: classifier label to display name
//! - [`estimate`]: food name to macro estimate
//! - [`aggregate`]: stored entry rows to daily totals

/// Stored entry rows to macro totals
pub mod aggregator;
/// Food name to per-serving macro estimate
pub mod estimator;
/// Classifier label to canonical display name
pub mod normalizer;
/// Canonical food keys and their per-serving macros
pub mod reference_table;

pub use aggregator::{aggregate, profile_from_row};
pub use estimator::estimate;
pub use normalizer::{normalize, title_case};
pub use reference_table::ReferenceFoodTable;
