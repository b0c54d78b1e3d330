// ABOUTME: Integration tests for macro goals and the daily dashboard summary
// ABOUTME: Verifies default goals, goal updates and totals tracked against them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_app, create_test_resources, register_and_login};
use helpers::axum_test::AxumTestRequest;
use helpers::classifiers::ScriptedClassifier;
use macrolens_server::models::{MacroGoals, MacroSummary, MacroTargets, NutritionProfile};
use macrolens_server::services::food_log;
use serde_json::{json, Value};
use std::sync::Arc;

async fn setup() -> (axum::Router, String) {
    let resources = create_test_resources(Arc::new(ScriptedClassifier::new(Vec::new())));
    let token = register_and_login(&resources, "tracker@example.com").await;
    (create_test_app(&resources), token)
}

async fn log_food(app: &axum::Router, token: &str, name: &str, calories: f64) {
    AxumTestRequest::post("/food/entries")
        .bearer(token)
        .json(&json!({
            "food_name": name,
            "calories": calories,
            "protein": 10,
            "carbs": 30,
            "fats": 8,
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_goals_default_when_never_set() {
    let (app, token) = setup().await;

    let goals: MacroGoals = AxumTestRequest::get("/macro-goals")
        .bearer(&token)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(goals.targets, MacroTargets::default());
    assert!(goals.created_at.is_none());
}

#[tokio::test]
async fn test_goals_update_is_an_upsert() {
    let (app, token) = setup().await;

    let first: MacroGoals = AxumTestRequest::post("/macro-goals")
        .bearer(&token)
        .json(&json!({"calorie_goal": 1800, "protein_goal": 140, "carb_goal": 150, "fat_goal": 60}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!((first.targets.calorie_goal - 1800.0).abs() < f64::EPSILON);

    AxumTestRequest::post("/macro-goals")
        .bearer(&token)
        .json(&json!({"calorie_goal": 2200, "protein_goal": 160, "carb_goal": 250, "fat_goal": 70}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);

    let stored: MacroGoals = AxumTestRequest::get("/macro-goals")
        .bearer(&token)
        .send(app)
        .await
        .json();
    assert_eq!(
        stored.targets,
        MacroTargets {
            calorie_goal: 2200.0,
            protein_goal: 160.0,
            carb_goal: 250.0,
            fat_goal: 70.0,
        }
    );
    assert_eq!(stored.created_at, first.created_at);
}

#[tokio::test]
async fn test_goals_reject_negative_values() {
    let (app, token) = setup().await;

    let response = AxumTestRequest::post("/macro-goals")
        .bearer(&token)
        .json(&json!({"calorie_goal": -1, "protein_goal": 140, "carb_goal": 150, "fat_goal": 60}))
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_sums_todays_entries_against_default_goals() {
    let (app, token) = setup().await;
    log_food(&app, &token, "Breakfast burrito", 200.0).await;
    log_food(&app, &token, "Chicken salad", 300.0).await;

    let summary: MacroSummary = AxumTestRequest::get("/dashboard/summary")
        .bearer(&token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(summary.date, food_log::today());
    assert_eq!(summary.totals, NutritionProfile::new(500.0, 20.0, 60.0, 16.0));
    assert_eq!(summary.goals, MacroTargets::default());

    let raw: Value = AxumTestRequest::get("/dashboard/summary")
        .bearer(&token)
        .send(app)
        .await
        .json();
    assert_eq!(raw["calories"], json!(500.0));
    assert_eq!(raw["calorie_goal"], json!(2000.0));
}

#[tokio::test]
async fn test_dashboard_for_empty_day_is_zero() {
    let (app, token) = setup().await;
    log_food(&app, &token, "Today only", 450.0).await;

    let summary: MacroSummary = AxumTestRequest::get("/dashboard/summary?date=2001-09-09")
        .bearer(&token)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(summary.totals, NutritionProfile::ZERO);
}

#[tokio::test]
async fn test_dashboard_follows_updated_goals() {
    let (app, token) = setup().await;

    AxumTestRequest::post("/macro-goals")
        .bearer(&token)
        .json(&json!({"calorie_goal": 1500, "protein_goal": 120, "carb_goal": 100, "fat_goal": 50}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);

    let summary: MacroSummary = AxumTestRequest::get("/dashboard/summary")
        .bearer(&token)
        .send(app)
        .await
        .json();
    assert!((summary.goals.calorie_goal - 1500.0).abs() < f64::EPSILON);
}
