//! Mock catalog client for testing
//!
//! Provides a mock implementation of [`CatalogApi`] for unit testing
//! without making real HTTP requests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::models::{ApiEntry, EntryQuery};
use super::CatalogApi;
use crate::catalog::sort_by_name;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockCatalogClient::new()
///     .with_entries(vec![ApiEntry::new("AdoptAPet", ...)])
///     .await;
///
/// let entries = mock.fetch_entries(&EntryQuery::all()).await?;
/// assert_eq!(entries.len(), 1);
/// ```
#[derive(Default)]
pub struct MockCatalogClient {
    /// Entries to return from fetch_entries
    entries: Arc<Mutex<Vec<ApiEntry>>>,
    /// Categories to return from fetch_categories
    categories: Arc<Mutex<Vec<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Keep failing every call until cleared
    fail_always: Arc<Mutex<bool>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured entry queries for test assertions
    captured_queries: Arc<Mutex<Vec<EntryQuery>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub fetch_entries: usize,
    pub fetch_categories: usize,
}

impl MockCatalogClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure entries to return from fetch_entries.
    pub async fn with_entries(self, entries: Vec<ApiEntry>) -> Self {
        *self.entries.lock().await = entries;
        self
    }

    /// Configure categories to return from fetch_categories.
    pub async fn with_categories(self, categories: Vec<&str>) -> Self {
        *self.categories.lock().await = categories.into_iter().map(String::from).collect();
        self
    }

    /// Configure an error to return on the next call.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Make every call fail with a network error until [`Self::recover`] is called.
    pub async fn set_offline(&self) {
        *self.fail_always.lock().await = true;
    }

    /// Stop failing calls.
    pub async fn recover(&self) {
        *self.fail_always.lock().await = false;
    }

    /// Replace the entries served by later calls.
    pub async fn set_entries(&self, entries: Vec<ApiEntry>) {
        *self.entries.lock().await = entries;
    }

    /// Get the current call counts.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get the entry queries received so far.
    pub async fn captured_queries(&self) -> Vec<EntryQuery> {
        self.captured_queries.lock().await.clone()
    }

    async fn check_error(&self) -> Result<()> {
        if *self.fail_always.lock().await {
            return Err(ApiError::Network("simulated outage".to_string()).into());
        }
        if let Some(err) = self.error.lock().await.take() {
            return Err(err.into());
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for MockCatalogClient {
    async fn fetch_entries(&self, query: &EntryQuery) -> Result<Vec<ApiEntry>> {
        self.call_count.lock().await.fetch_entries += 1;
        self.captured_queries.lock().await.push(query.clone());
        self.check_error().await?;

        // Mirror the server: only the category narrows the result
        let mut entries: Vec<ApiEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|e| query.server_category().is_none_or(|c| e.category == c))
            .cloned()
            .collect();
        sort_by_name(&mut entries);
        Ok(entries)
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        self.call_count.lock().await.fetch_categories += 1;
        self.check_error().await?;
        Ok(self.categories.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, category: &str) -> ApiEntry {
        ApiEntry::new(name, "desc", None, true, None, "https://example.com", category)
    }

    #[tokio::test]
    async fn test_mock_returns_configured_entries_sorted() {
        let mock = MockCatalogClient::new()
            .with_entries(vec![entry("beta", "X"), entry("Alpha", "X")])
            .await;

        let entries = mock.fetch_entries(&EntryQuery::all()).await.unwrap();
        assert_eq!(entries[0].name, "Alpha");
        assert_eq!(entries[1].name, "beta");
        assert_eq!(mock.call_counts().await.fetch_entries, 1);
    }

    #[tokio::test]
    async fn test_mock_filters_by_category() {
        let mock = MockCatalogClient::new()
            .with_entries(vec![entry("A", "Animals"), entry("B", "Anime")])
            .await;

        let query = EntryQuery {
            category: Some("Anime".to_string()),
            ..EntryQuery::all()
        };
        let entries = mock.fetch_entries(&query).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "B");
        assert_eq!(mock.captured_queries().await, vec![query]);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockCatalogClient::new()
            .with_error(ApiError::Network("down".to_string()))
            .await;

        assert!(mock.fetch_categories().await.is_err());
        assert!(mock.fetch_categories().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_offline_until_recovered() {
        let mock = MockCatalogClient::new();
        mock.set_offline().await;
        assert!(mock.fetch_entries(&EntryQuery::all()).await.is_err());
        assert!(mock.fetch_entries(&EntryQuery::all()).await.is_err());

        mock.recover().await;
        assert!(mock.fetch_entries(&EntryQuery::all()).await.is_ok());
    }
}
