// ABOUTME: Food entry logging and daily macro summaries
// ABOUTME: Creates, lists and deletes entries and aggregates a day against the user's goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::goals;
use crate::nutrition::{aggregate, profile_from_row};
use crate::store::{Filter, Order, Row, TableStore};
use chrono::{NaiveDate, SecondsFormat, Utc};
use macrolens_core::constants::tables;
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{DailyLog, FoodEntry, FoodEntryCreate, MacroSummary, MacroTargets};
use serde_json::Value;
use tracing::info;

/// Today in UTC
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Summarize a day's rows against `goals`
///
/// # Errors
///
/// Returns a `TypeConversion` error if a stored macro is not numeric
pub fn summarize(date: NaiveDate, rows: &[Row], goals: MacroTargets) -> AppResult<MacroSummary> {
    Ok(MacroSummary {
        date,
        totals: aggregate(rows)?,
        goals,
    })
}

/// Convert a stored row into a [`FoodEntry`]
///
/// Macro columns go through the aggregator's coercion, so numeric strings
/// are accepted and missing values read as 0.
///
/// # Errors
///
/// Returns an error if a macro is not numeric or a required column is missing
pub fn entry_from_row(mut row: Row) -> AppResult<FoodEntry> {
    let profile = profile_from_row(&row)?;
    for (field, value) in profile.fields() {
        row.insert(field.to_owned(), Value::from(value));
    }
    Ok(serde_json::from_value(Value::Object(row))?)
}

async fn entry_rows(store: &dyn TableStore, user_id: &str, date: NaiveDate) -> AppResult<Vec<Row>> {
    store
        .select(
            tables::FOOD_ENTRIES,
            &[
                Filter::eq("user_id", user_id),
                Filter::eq("entry_date", date.to_string()),
            ],
            Some(&Order::desc("created_at")),
        )
        .await
}

/// Log a food entry for `user_id`
///
/// # Errors
///
/// Returns a validation error for a blank name or invalid macros, or an
/// error from the store
pub async fn create_entry(
    store: &dyn TableStore,
    user_id: &str,
    request: FoodEntryCreate,
) -> AppResult<FoodEntry> {
    request.validate()?;

    let entry_date = request.entry_date.unwrap_or_else(today);
    let mut row = Row::new();
    row.insert("user_id".to_owned(), Value::from(user_id));
    row.insert("food_name".to_owned(), Value::from(request.food_name.trim()));
    for (field, value) in request.nutrition().fields() {
        row.insert(field.to_owned(), Value::from(value));
    }
    if let Some(serving_size) = request.serving_size {
        row.insert("serving_size".to_owned(), Value::from(serving_size));
    }
    if let Some(image_url) = request.image_url {
        row.insert("image_url".to_owned(), Value::from(image_url));
    }
    row.insert("entry_date".to_owned(), Value::from(entry_date.to_string()));
    row.insert(
        "created_at".to_owned(),
        Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
    );

    let stored = store.insert(tables::FOOD_ENTRIES, row).await?;
    let entry = entry_from_row(stored)?;
    info!(user_id, entry_id = entry.id, date = %entry.entry_date, "Food entry created");
    Ok(entry)
}

/// Entries of `user_id` on `date`, newest first
///
/// # Errors
///
/// Returns an error if the store fails or a row is unreadable
pub async fn list_entries(
    store: &dyn TableStore,
    user_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<FoodEntry>> {
    entry_rows(store, user_id, date)
        .await?
        .into_iter()
        .map(entry_from_row)
        .collect()
}

/// Delete entry `entry_id` if it belongs to `user_id`
///
/// # Errors
///
/// Returns `ResourceNotFound` when the entry does not exist or is owned by
/// someone else
pub async fn delete_entry(store: &dyn TableStore, user_id: &str, entry_id: i64) -> AppResult<()> {
    let filters = [Filter::eq("id", entry_id), Filter::eq("user_id", user_id)];

    let owned = store.select(tables::FOOD_ENTRIES, &filters, None).await?;
    if owned.is_empty() {
        return Err(AppError::not_found("Food entry"));
    }

    store.delete(tables::FOOD_ENTRIES, &filters).await?;
    info!(user_id, entry_id, "Food entry deleted");
    Ok(())
}

/// Totals of `date` next to the user's goals
///
/// # Errors
///
/// Returns an error if the store fails or a stored macro is not numeric
pub async fn daily_summary(
    store: &dyn TableStore,
    user_id: &str,
    date: NaiveDate,
) -> AppResult<MacroSummary> {
    let rows = entry_rows(store, user_id, date).await?;
    let goals = goals::get_goals(store, user_id).await?;
    summarize(date, &rows, goals.targets)
}

/// Entries of `date` with their summary
///
/// # Errors
///
/// Returns an error if the store fails or a stored row is unreadable
pub async fn daily_log(store: &dyn TableStore, user_id: &str, date: NaiveDate) -> AppResult<DailyLog> {
    let rows = entry_rows(store, user_id, date).await?;
    let goals = goals::get_goals(store, user_id).await?;
    let totals = summarize(date, &rows, goals.targets)?;
    let entries = rows
        .into_iter()
        .map(entry_from_row)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(DailyLog {
        date,
        entries,
        totals,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::store::MemoryTableStore;
    use macrolens_core::errors::ErrorCode;
    use macrolens_core::models::NutritionProfile;
    use serde_json::json;

    fn entry(name: &str, calories: f64, date: NaiveDate) -> FoodEntryCreate {
        FoodEntryCreate {
            food_name: name.to_owned(),
            calories,
            protein: 10.0,
            carbs: 20.0,
            fats: 5.0,
            serving_size: None,
            image_url: None,
            entry_date: Some(date),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap_or_default()
    }

    #[test]
    fn test_summarize_uses_given_goals() {
        let rows: Vec<Row> = [json!({"calories": 200}), json!({"calories": "300"})]
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect();

        let summary = summarize(day(), &rows, MacroTargets::default()).unwrap();
        assert_eq!(summary.totals, NutritionProfile::new(500.0, 0.0, 0.0, 0.0));
        assert_eq!(summary.goals, MacroTargets::default());
    }

    #[test]
    fn test_entry_from_row_coerces_macros() {
        let row = json!({
            "id": 3, "user_id": "u", "food_name": "Egg", "calories": "70", "protein": null,
            "carbs": 0.6, "entry_date": "2025-03-14", "created_at": "2025-03-14T08:00:00+00:00"
        });
        let entry = entry_from_row(row.as_object().cloned().unwrap_or_default()).unwrap();
        assert_eq!(entry.nutrition, NutritionProfile::new(70.0, 0.0, 0.6, 0.0));
        assert_eq!(entry.entry_date, day());
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let store = MemoryTableStore::new();
        let first = create_entry(&store, "u-1", entry("Apple", 95.0, day())).await.unwrap();
        let second = create_entry(&store, "u-1", entry("Egg", 70.0, day())).await.unwrap();
        create_entry(&store, "u-2", entry("Rice", 130.0, day())).await.unwrap();

        let listed = list_entries(&store, "u-1", day()).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|e| e.food_name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Apple") && names.contains(&"Egg"));

        let error = delete_entry(&store, "u-2", first.id).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);

        delete_entry(&store, "u-1", first.id).await.unwrap();
        let listed = list_entries(&store, "u-1", day()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second.id);
    }

    #[tokio::test]
    async fn test_daily_log_totals_match_entries() {
        let store = MemoryTableStore::new();
        create_entry(&store, "u-1", entry("Apple", 200.0, day())).await.unwrap();
        create_entry(&store, "u-1", entry("Egg", 300.0, day())).await.unwrap();
        let other_day = day().succ_opt().unwrap_or_default();
        create_entry(&store, "u-1", entry("Rice", 999.0, other_day)).await.unwrap();

        let log = daily_log(&store, "u-1", day()).await.unwrap();
        assert_eq!(log.entries.len(), 2);
        assert_eq!(log.totals.totals, NutritionProfile::new(500.0, 20.0, 40.0, 10.0));
        assert_eq!(log.totals.goals, MacroTargets::default());
    }

    #[tokio::test]
    async fn test_corrupt_stored_macro_is_an_error() {
        let store = MemoryTableStore::new();
        let row = json!({"user_id": "u-1", "entry_date": day().to_string(), "calories": "lots"});
        store
            .insert(tables::FOOD_ENTRIES, row.as_object().cloned().unwrap_or_default())
            .await
            .unwrap();

        let error = daily_summary(&store, "u-1", day()).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::TypeConversion);
    }
}
