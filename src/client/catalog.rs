//! HTTP implementation of the catalog client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};

use super::models::{ApiEntry, CategoriesResponse, EntryQuery, decode_entries};
use super::CatalogApi;
use crate::catalog::sort_by_name;
use crate::config::DEFAULT_API_HOST;
use crate::error::{ApiError, Result};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog API client backed by reqwest
pub struct CatalogClient {
    http: HttpClient,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the default catalog backend
    #[allow(dead_code)]
    pub fn new() -> Result<Self> {
        Self::with_host(None, DEFAULT_TIMEOUT)
    }

    /// Create a client for a custom host (development, testing, mirrors)
    pub fn with_host(host: Option<String>, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = host
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { http, base_url })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters for server-side category filtering.
    ///
    /// The backend expects JSON-quoted values for both the key and the value.
    fn category_params(query: &EntryQuery) -> Vec<(&'static str, String)> {
        match query.server_category() {
            Some(category) => vec![
                ("orderBy", "\"Category\"".to_string()),
                ("equalTo", format!("\"{}\"", category)),
            ],
            None => vec![],
        }
    }

    /// GET a path and return the raw body of a successful response
    async fn get_bytes(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {} {:?}", url, params);

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body = response.bytes().await.map_err(ApiError::from)?;
                Ok(body.to_vec())
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_entries(&self, query: &EntryQuery) -> Result<Vec<ApiEntry>> {
        let params = Self::category_params(query);
        let body = self.get_bytes("/entries.json", &params).await?;

        let mut entries = decode_entries(&body)?;
        sort_by_name(&mut entries);

        log::debug!("Decoded {} entries", entries.len());
        Ok(entries)
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        let body = self.get_bytes("/categories.json", &[]).await?;
        let response: CategoriesResponse = serde_json::from_slice(&body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse categories: {}", e)))?;

        log::debug!("Decoded {} categories", response.categories.len());
        Ok(response.categories)
    }
}
