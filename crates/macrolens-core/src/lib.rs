// ABOUTME: Core types and constants for the Macrolens nutrition API
// ABOUTME: Foundation crate with error handling, nutrition models, and default values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

#![deny(unsafe_code)]

//! # Macrolens Core
//!
//! Foundation crate providing shared types and constants for the Macrolens
//! food tracking API. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Default goals, fallback recognition payload, table names
//! - **models**: Nutrition profiles, food entries, goals and account types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`NutritionProfile`, `FoodEntry`, `MacroSummary`, etc.)
pub mod models;
