// ABOUTME: Core data models for the Macrolens API
// ABOUTME: Re-exports nutrition, food entry, goal and account types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! # Data Models
//!
//! - `NutritionProfile`: the four-field macro record shared by everything else
//! - `FoodEntry` / `FoodEntryCreate`: logged food, as stored and as submitted
//! - `RecognitionResult`: output of a single food photo recognition
//! - `MacroTargets`, `MacroGoals`, `MacroSummary`, `DailyLog`: goals and daily views
//! - `AuthenticatedUser`, `AuthSession`, `UserProfile`: account types

mod food;
mod goals;
mod nutrition;
mod user;

pub use food::{FoodEntry, FoodEntryCreate, RecognitionResult};
pub use goals::{DailyLog, MacroGoals, MacroSummary, MacroTargets};
pub use nutrition::{NutritionProfile, MACRO_FIELDS};
pub use user::{
    AuthSession, AuthenticatedUser, LoginRequest, RegisterRequest, RegisterResponse, UserProfile,
};
