// ABOUTME: Food route handlers for photo recognition, entry logging and manual estimates
// ABOUTME: Thin handlers over the recognition orchestrator and the food log service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Food routes
//!
//! `POST /food/recognize` always answers 200 once a file part is present: a
//! failed recognition is reported through the fallback payload.

use super::{json_body, DateQuery};
use crate::auth::authenticate;
use crate::context::ServerResources;
use crate::services::{food_log, FoodEstimate};
use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, Query, State},
    http::HeaderMap,
    routing::{delete, get, post},
    Json, Router,
};
use macrolens_core::errors::{AppError, ErrorCode};
use macrolens_core::models::{DailyLog, FoodEntry, FoodEntryCreate, RecognitionResult};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Multipart field carrying the photo
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
struct EstimateQuery {
    #[serde(default)]
    name: Option<String>,
}

/// Food routes
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create `/food/*` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/food/recognize", post(Self::handle_recognize))
            .route(
                "/food/entries",
                get(Self::handle_list_entries).post(Self::handle_create_entry),
            )
            .route("/food/entries/:id", delete(Self::handle_delete_entry))
            .route("/food/daily-log", get(Self::handle_daily_log))
            .route("/food/estimate", get(Self::handle_estimate))
            .with_state(resources)
    }

    async fn handle_recognize(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> Result<Json<RecognitionResult>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_input(format!("Invalid multipart body: {e}")))?
        {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let content_type = field.content_type().map(str::to_owned);
            let image = field
                .bytes()
                .await
                .map_err(|e| AppError::invalid_input(format!("Could not read upload: {e}")))?;
            debug!(
                user_id = %user.id,
                bytes = image.len(),
                content_type = content_type.as_deref().unwrap_or("unknown"),
                "Recognizing uploaded food photo"
            );

            return Ok(Json(resources.recognizer.recognize_food(image).await));
        }

        Err(AppError::new(
            ErrorCode::MissingRequiredField,
            format!("multipart field '{FILE_FIELD}' is required"),
        ))
    }

    async fn handle_create_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<FoodEntryCreate>, JsonRejection>,
    ) -> Result<Json<FoodEntry>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;
        let request = json_body(payload)?;
        let entry = food_log::create_entry(resources.store.as_ref(), &user.id, request).await?;
        Ok(Json(entry))
    }

    async fn handle_list_entries(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Json<Vec<FoodEntry>>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;
        let entries =
            food_log::list_entries(resources.store.as_ref(), &user.id, query.day()?).await?;
        Ok(Json(entries))
    }

    async fn handle_delete_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Json<Value>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;
        let entry_id: i64 = id
            .parse()
            .map_err(|_| AppError::invalid_format(format!("entry id must be an integer, got '{id}'")))?;

        food_log::delete_entry(resources.store.as_ref(), &user.id, entry_id).await?;
        Ok(Json(json!({"message": "Entry deleted successfully"})))
    }

    async fn handle_daily_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Json<DailyLog>, AppError> {
        let user = authenticate(&headers, resources.identity.as_ref()).await?;
        let log = food_log::daily_log(resources.store.as_ref(), &user.id, query.day()?).await?;
        Ok(Json(log))
    }

    async fn handle_estimate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<EstimateQuery>,
    ) -> Result<Json<FoodEstimate>, AppError> {
        authenticate(&headers, resources.identity.as_ref()).await?;
        let name = query
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(ErrorCode::MissingRequiredField, "query parameter 'name' is required")
            })?;
        Ok(Json(resources.recognizer.estimate_by_name(&name)))
    }
}
