// ABOUTME: External API client modules (food image classification)
// ABOUTME: Provides the classifier seam used by food recognition

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! External API Clients
//!
//! This module contains clients for external APIs used by the Macrolens server.

pub mod classifier;

// Re-export commonly used types
pub use classifier::{ClassifierError, ClassifierLabel, FoodClassifier, HttpFoodClassifier};
