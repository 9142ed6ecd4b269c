use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use log::error;

use crate::errors::StoreError;
use crate::language_utils::Language;
use super::{Listing, ListingStore};

/// Default timeout for store requests
const STORE_TIMEOUT_SECS: u64 = 30;

/// PostgREST-backed listing store (Supabase)
#[derive(Debug)]
pub struct SupabaseStore {
    /// HTTP client for store requests
    client: Client,
    /// Project base URL, without the /rest/v1 suffix
    base_url: String,
    /// Service key, sent as both apikey and bearer token
    service_key: String,
    /// Table holding the listings
    table: String,
}

/// Raw row as returned by the REST API
///
/// The primary key may be numeric or a string depending on the table
/// definition, so it is taken as a raw value and normalized to a string.
#[derive(Debug, Deserialize)]
struct ListingRow {
    id: serde_json::Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ListingRow {
    fn into_listing(self) -> Listing {
        let id = match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Listing {
            id,
            title: self.title,
            description: self.description,
        }
    }
}

impl SupabaseStore {
    /// Create a new store client
    pub fn new(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(STORE_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            service_key: service_key.into(),
            table: table.into(),
        }
    }

    /// URL of the listing table's REST route
    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }

    /// Attach the auth headers every store request needs
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }
}

#[async_trait]
impl ListingStore for SupabaseStore {
    async fn fetch_untranslated(
        &self,
        language: &Language,
        batch_size: usize,
        offset: usize,
    ) -> Result<Vec<Listing>, StoreError> {
        let title_column = language.title_column();

        // PostgREST "null or empty" predicate on the target title column
        let request = self
            .client
            .get(self.table_url())
            .query(&[
                ("select", "id,title,description".to_string()),
                (
                    "or",
                    format!("({col}.is.null,{col}.eq.)", col = title_column),
                ),
                ("limit", batch_size.to_string()),
                ("offset", offset.to_string()),
            ]);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Store fetch error ({}): {}", status, error_text);
            return Err(StoreError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let rows = response
            .json::<Vec<ListingRow>>()
            .await
            .map_err(|e| StoreError::ParseError(e.to_string()))?;

        Ok(rows.into_iter().map(ListingRow::into_listing).collect())
    }

    async fn write_translation(
        &self,
        id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(fields);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Store update error for id {} ({}): {}", id, status, error_text);
            return Err(StoreError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        Ok(())
    }
}
