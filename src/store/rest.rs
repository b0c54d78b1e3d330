// ABOUTME: Table store backed by a PostgREST endpoint of the managed backend
// ABOUTME: Translates filters and ordering into PostgREST query parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::{Filter, Order, Row, TableStore};
use macrolens_core::constants::tables;
use macrolens_core::errors::{AppError, AppResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

const SERVICE: &str = "table store";

/// PostgREST table store
///
/// Requests go to `{base_url}/rest/v1/{table}` and authenticate with the
/// service key in both the `apikey` header and a bearer token.
#[derive(Clone)]
pub struct RestTableStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestTableStore {
    /// Create a store for `base_url` using `client`
    pub fn new(client: Client, base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            service_key: service_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    fn query(filters: &[Filter], order: Option<&Order>) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = filters
            .iter()
            .map(|filter| (filter.column.clone(), format!("eq.{}", filter.value_text())))
            .collect();
        if let Some(order) = order {
            let direction = if order.descending { "desc" } else { "asc" };
            params.push(("order".to_owned(), format!("{}.{direction}", order.column)));
        }
        params
    }

    async fn send(builder: RequestBuilder) -> AppResult<Response> {
        builder
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE, e.to_string()))
    }

    async fn rows(table: &str, response: Response) -> AppResult<Vec<Row>> {
        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Err(AppError::already_exists(format!("{table} row")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::database(format!("{table}: HTTP {status}: {body}")));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| AppError::database(format!("{table}: unreadable response: {e}")))
    }
}

#[async_trait::async_trait]
impl TableStore for RestTableStore {
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
    ) -> AppResult<Vec<Row>> {
        let mut params = Self::query(filters, order);
        params.push(("select".to_owned(), "*".to_owned()));
        debug!(table, filters = filters.len(), "PostgREST select");

        let request = self.authorized(self.client.get(self.table_url(table))).query(&params);
        Self::rows(table, Self::send(request).await?).await
    }

    async fn insert(&self, table: &str, row: Row) -> AppResult<Row> {
        let request = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&row);

        Self::rows(table, Self::send(request).await?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::database(format!("{table}: insert returned no row")))
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> AppResult<Vec<Row>> {
        let request = self
            .authorized(self.client.patch(self.table_url(table)))
            .query(&Self::query(filters, None))
            .header("Prefer", "return=representation")
            .json(&patch);

        Self::rows(table, Self::send(request).await?).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> AppResult<Vec<Row>> {
        let request = self
            .authorized(self.client.delete(self.table_url(table)))
            .query(&Self::query(filters, None))
            .header("Prefer", "return=representation");

        Self::rows(table, Self::send(request).await?).await
    }

    async fn ping(&self) -> AppResult<()> {
        let request = self
            .authorized(self.client.get(self.table_url(tables::USERS)))
            .query(&[("select", "id"), ("limit", "1")]);

        Self::rows(tables::USERS, Self::send(request).await?)
            .await
            .map(|_| ())
    }

    fn backend_name(&self) -> &'static str {
        "postgrest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parameters() {
        let params = RestTableStore::query(
            &[Filter::eq("user_id", "u-1"), Filter::eq("id", 4)],
            Some(&Order::desc("created_at")),
        );

        assert_eq!(
            params,
            vec![
                ("user_id".to_owned(), "eq.u-1".to_owned()),
                ("id".to_owned(), "eq.4".to_owned()),
                ("order".to_owned(), "created_at.desc".to_owned()),
            ]
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = RestTableStore::new(Client::new(), "https://backend.example/", "key");
        assert_eq!(
            store.table_url("users"),
            "https://backend.example/rest/v1/users"
        );
    }
}
