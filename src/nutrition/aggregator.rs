// ABOUTME: Sums stored food-entry rows into total calories and macros
// ABOUTME: Coerces loosely typed stored values and rejects values that are not numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Macro aggregation over stored rows
//!
//! Rows come straight from the table store, so a macro column may be absent,
//! `null`, a JSON number or a numeric string. Absent and `null` count as 0.
//! Anything else that does not read as a finite number is corrupt upstream
//! data and fails with `ErrorCode::TypeConversion` instead of being zeroed.

use crate::store::Row;
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{NutritionProfile, MACRO_FIELDS};
use serde_json::Value;

/// Sum the macro columns of `rows`
///
/// # Errors
///
/// Returns a `TypeConversion` error for the first macro value that cannot be
/// read as a number
pub fn aggregate<'a, I>(rows: I) -> AppResult<NutritionProfile>
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter()
        .try_fold(NutritionProfile::ZERO, |total, row| {
            Ok(total + profile_from_row(row)?)
        })
}

/// Read the macro columns of one row
///
/// # Errors
///
/// Returns a `TypeConversion` error if a present value is not numeric
pub fn profile_from_row(row: &Row) -> AppResult<NutritionProfile> {
    let [calories, protein, carbs, fats] = MACRO_FIELDS;
    Ok(NutritionProfile::new(
        coerce_macro(row, calories)?,
        coerce_macro(row, protein)?,
        coerce_macro(row, carbs)?,
        coerce_macro(row, fats)?,
    ))
}

fn coerce_macro(row: &Row, field: &str) -> AppResult<f64> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| AppError::type_conversion(field, format!("{number} is out of range"))),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| AppError::type_conversion(field, format!("'{text}' is not a number"))),
        Some(other) => Err(AppError::type_conversion(
            field,
            format!("{other} is not a number"),
        )),
    }
}
