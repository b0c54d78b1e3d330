// ABOUTME: In-memory table store used for development and tests
// ABOUTME: Ordered rows per table behind a tokio RwLock with auto-increment ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::{Filter, Order, Row, TableStore};
use macrolens_core::constants::tables;
use macrolens_core::errors::{AppError, AppResult};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct TableData {
    rows: Vec<Row>,
    next_id: i64,
}

/// In-memory table store
///
/// Rows keep insertion order. A row inserted without an `id` gets the next
/// integer id of its table. `macro_goals` is keyed by `user_id`, every other
/// table by `id`.
#[derive(Clone, Default)]
pub struct MemoryTableStore {
    tables: Arc<RwLock<HashMap<String, TableData>>>,
}

impl MemoryTableStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn primary_key(table: &str) -> &'static str {
        if table == tables::MACRO_GOALS {
            "user_id"
        } else {
            "id"
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        // nulls sort above every value, as in PostgreSQL
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait::async_trait]
impl TableStore for MemoryTableStore {
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
    ) -> AppResult<Vec<Row>> {
        let guard = self.tables.read().await;
        let mut rows: Vec<Row> = guard
            .get(table)
            .map(|data| {
                data.rows
                    .iter()
                    .filter(|row| filters.iter().all(|filter| filter.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(guard);

        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, mut row: Row) -> AppResult<Row> {
        let key = Self::primary_key(table);
        let mut guard = self.tables.write().await;
        let data = guard.entry(table.to_owned()).or_default();

        if key == "id" && !row.contains_key("id") {
            data.next_id += 1;
            row.insert("id".to_owned(), Value::from(data.next_id));
        }

        if let Some(value) = row.get(key) {
            let probe = Filter::eq(key, value.clone());
            if data.rows.iter().any(|existing| probe.matches(existing)) {
                return Err(AppError::already_exists(format!(
                    "{table} row with {key} {}",
                    probe.value_text()
                )));
            }
            if let Some(id) = value.as_i64() {
                data.next_id = data.next_id.max(id);
            }
        }

        data.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> AppResult<Vec<Row>> {
        let mut guard = self.tables.write().await;
        let Some(data) = guard.get_mut(table) else {
            return Ok(Vec::new());
        };

        let mut updated = Vec::new();
        for row in &mut data.rows {
            if filters.iter().all(|filter| filter.matches(row)) {
                for (column, value) in &patch {
                    row.insert(column.clone(), value.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> AppResult<Vec<Row>> {
        let mut guard = self.tables.write().await;
        let Some(data) = guard.get_mut(table) else {
            return Ok(Vec::new());
        };

        let (deleted, kept): (Vec<Row>, Vec<Row>) = data
            .rows
            .drain(..)
            .partition(|row| filters.iter().all(|filter| filter.matches(row)));
        data.rows = kept;
        Ok(deleted)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
