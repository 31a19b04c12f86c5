//! Public API catalog client

use async_trait::async_trait;

use crate::error::Result;

pub mod catalog;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use catalog::CatalogClient;
#[cfg(test)]
pub use mock::MockCatalogClient;
pub use models::{ApiEntry, EntryQuery};

/// Catalog API client trait
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch entries, sorted by name (case-insensitive).
    ///
    /// Only the query's category narrows the request; name and description
    /// matching is left to the caller.
    async fn fetch_entries(&self, query: &EntryQuery) -> Result<Vec<ApiEntry>>;

    /// Fetch the list of catalog categories
    async fn fetch_categories(&self) -> Result<Vec<String>>;
}
