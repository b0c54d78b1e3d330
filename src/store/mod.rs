// ABOUTME: Table store abstraction over the managed backend's row-oriented tables
// ABOUTME: Pluggable backends (in-memory, PostgREST) behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

/// In-memory table store
pub mod memory;
/// PostgREST table store
pub mod rest;

pub use memory::MemoryTableStore;
pub use rest::RestTableStore;

use macrolens_core::errors::AppResult;
use serde_json::{Map, Value};

/// A stored row as returned by the backend
pub type Row = Map<String, Value>;

/// Equality filter on one column
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Column name
    pub column: String,
    /// Value the column must equal
    pub value: Value,
}

impl Filter {
    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether `row` satisfies this filter
    ///
    /// Numbers compare by value and a string filter matches the string form
    /// of a stored number, so `id=eq.7` behaves the same in every backend.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        let Some(stored) = row.get(&self.column) else {
            return false;
        };
        match (stored, &self.value) {
            (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
            (Value::Number(a), Value::String(b)) | (Value::String(b), Value::Number(a)) => {
                a.to_string() == *b
            }
            (a, b) => a == b,
        }
    }

    /// Filter value rendered for a query string
    #[must_use]
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Sort order on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Column name
    pub column: String,
    /// Descending when true
    pub descending: bool,
}

impl Order {
    /// Ascending order on `column`
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    /// Descending order on `column`
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// Row-oriented table store
///
/// All filters are combined with AND. Mutations return the affected rows as
/// stored.
#[async_trait::async_trait]
pub trait TableStore: Send + Sync {
    /// Rows of `table` matching every filter, optionally ordered
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
    ) -> AppResult<Vec<Row>>;

    /// Insert one row and return it as stored
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` on a primary key conflict, or a
    /// database error
    async fn insert(&self, table: &str, row: Row) -> AppResult<Row>;

    /// Merge `patch` into every matching row and return the updated rows
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the update
    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> AppResult<Vec<Row>>;

    /// Delete every matching row and return the deleted rows
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete
    async fn delete(&self, table: &str, filters: &[Filter]) -> AppResult<Vec<Row>>;

    /// Check that the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error describing why the backend is unreachable
    async fn ping(&self) -> AppResult<()>;

    /// Backend name for logs
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_filter_matches_numbers_and_strings() {
        let stored = row(json!({"id": 7, "user_id": "u-1", "calories": 100.0}));

        assert!(Filter::eq("id", 7).matches(&stored));
        assert!(Filter::eq("id", "7").matches(&stored));
        assert!(Filter::eq("calories", 100).matches(&stored));
        assert!(Filter::eq("user_id", "u-1").matches(&stored));
        assert!(!Filter::eq("user_id", "u-2").matches(&stored));
        assert!(!Filter::eq("missing", "x").matches(&stored));
    }

    #[test]
    fn test_filter_value_text() {
        assert_eq!(Filter::eq("id", 7).value_text(), "7");
        assert_eq!(Filter::eq("entry_date", "2025-01-02").value_text(), "2025-01-02");
    }
}
