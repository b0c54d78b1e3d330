// ABOUTME: Per-user daily macro goals with defaults when nothing is stored
// ABOUTME: Reads and upserts rows of the macro_goals table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use crate::store::{Filter, Row, TableStore};
use chrono::{SecondsFormat, Utc};
use macrolens_core::constants::tables;
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{MacroGoals, MacroTargets};
use serde_json::Value;

/// Stored goals of `user_id`, or the defaults
///
/// # Errors
///
/// Returns an error if the store fails or the stored row is unreadable
pub async fn get_goals(store: &dyn TableStore, user_id: &str) -> AppResult<MacroGoals> {
    let rows = store
        .select(tables::MACRO_GOALS, &[Filter::eq("user_id", user_id)], None)
        .await?;

    rows.into_iter().next().map_or_else(
        || Ok(MacroGoals::defaults_for(user_id)),
        |row| Ok(serde_json::from_value(Value::Object(row))?),
    )
}

/// Store `targets` for `user_id`, updating existing goals in place
///
/// # Errors
///
/// Returns `ValueOutOfRange` for negative or non-finite goals, or an error
/// from the store
pub async fn upsert_goals(
    store: &dyn TableStore,
    user_id: &str,
    targets: MacroTargets,
) -> AppResult<MacroGoals> {
    targets.validate()?;

    let now = Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));
    let mut patch = match serde_json::to_value(targets)? {
        Value::Object(map) => map,
        _ => return Err(AppError::internal("goal targets did not serialize to an object")),
    };
    patch.insert("updated_at".to_owned(), now.clone());

    let filters = [Filter::eq("user_id", user_id)];
    let existing = store.select(tables::MACRO_GOALS, &filters, None).await?;

    let stored: Row = if existing.is_empty() {
        patch.insert("user_id".to_owned(), Value::from(user_id));
        patch.insert("created_at".to_owned(), now);
        store.insert(tables::MACRO_GOALS, patch).await?
    } else {
        store
            .update(tables::MACRO_GOALS, &filters, patch)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::database("goal update returned no row"))?
    };

    Ok(serde_json::from_value(Value::Object(stored))?)
}
