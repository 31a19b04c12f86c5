//! Fetch → filter → cache pipeline
//!
//! [`Catalog`] owns the entry store and the observable state, and drives
//! every refresh. One refresh at a time is expected; overlapping refreshes
//! are not coordinated and the last one to finish wins.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::filter::contains_ignore_case;
use super::state::{CatalogSnapshot, CatalogState, SnapshotReceiver};
use super::EntryFilter;
use crate::cache::EntryStore;
use crate::client::{ApiEntry, CatalogApi, EntryQuery};
use crate::error::{CacheError, Error, Result};

/// Counts from a completed refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Entries returned by the server
    pub fetched: usize,
    /// Entries left after the name/description filter
    pub matched: usize,
    /// Rows written to the bounded cache
    pub cached: usize,
    /// Entries now in the visible list
    pub visible: usize,
    /// False when the cache write failed and was rolled back
    pub cache_written: bool,
}

/// Entries of one category for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSection {
    pub category: String,
    pub entries: Vec<ApiEntry>,
}

/// Catalog orchestrator over an injected client and store
pub struct Catalog<C: CatalogApi> {
    client: Arc<C>,
    store: Mutex<EntryStore>,
    state: CatalogState,
}

impl<C: CatalogApi> Catalog<C> {
    /// Create the catalog and show whatever the cache already holds
    pub fn new(client: Arc<C>, store: EntryStore) -> Self {
        let catalog = Self {
            client,
            store: Mutex::new(store),
            state: CatalogState::new(),
        };
        if let Err(e) = catalog.load_existing_entries() {
            log::warn!("Failed to read cached entries: {}", e);
        }
        catalog
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        self.state.subscribe()
    }

    /// Run a closure against the store, holding the lock only for its duration
    pub fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut EntryStore) -> std::result::Result<T, CacheError>,
    {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| Error::Other("entry store lock poisoned".to_string()))?;
        Ok(f(&mut guard)?)
    }

    /// Replace the visible list with the cache contents, ordered by name
    pub fn load_existing_entries(&self) -> Result<usize> {
        let rows = self.with_store(|store| store.load_all())?;
        let entries: Vec<ApiEntry> = rows.into_iter().map(ApiEntry::from).collect();
        let count = entries.len();

        log::debug!("Loaded {} entries from cache", count);
        self.state.update(|s| s.entries = entries);
        Ok(count)
    }

    /// Set the filter used by the next refresh
    pub fn set_filter(&self, filter: EntryFilter) {
        self.state.update(|s| s.filter = filter);
    }

    /// First load: all entries and categories, fetched concurrently.
    ///
    /// Ignores the current filter. Fills the dashboard set, repopulates the
    /// cache and shows the cached rows. A failed cache write is logged and
    /// leaves the previous cache contents visible.
    pub async fn load_initial(&self) -> Result<()> {
        self.state.set_loading(true);

        let result = self.load_initial_inner().await;

        self.state.set_loading(false);
        if let Err(ref e) = result {
            log::error!("Initial catalog load failed: {}", e);
        }
        result
    }

    async fn load_initial_inner(&self) -> Result<()> {
        let query = EntryQuery::all();
        let (entries, categories) = futures::try_join!(
            self.client.fetch_entries(&query),
            self.client.fetch_categories()
        )?;

        log::info!(
            "Loaded {} entries and {} categories",
            entries.len(),
            categories.len()
        );

        self.persist(&entries);
        self.state.update(|s| {
            s.all_entries = entries;
            s.categories = categories;
        });
        self.load_existing_entries()?;
        Ok(())
    }

    /// Write the capped result to the cache; failures are logged, not returned
    fn persist(&self, entries: &[ApiEntry]) -> Option<usize> {
        match self.with_store(|store| store.replace_all(entries)) {
            Ok(written) => Some(written),
            Err(e) => {
                log::error!("Failed to write entry cache: {}", e);
                None
            }
        }
    }

    /// Refresh with the current filter.
    ///
    /// The cache always receives the filtered result (capped). With an active
    /// filter the visible list is the full filtered result; otherwise it is
    /// read back from the cache. On a fetch failure the visible list is left
    /// as it was; a cache write failure only shows up in the summary.
    pub async fn refresh(&self) -> Result<RefreshSummary> {
        let filter = self.state.snapshot().filter;
        log::info!(
            "Loading entries with filters: name={:?}, description={:?}, category={:?}",
            filter.name_query,
            filter.description_query,
            filter.category
        );

        if self.state.is_loading() {
            log::debug!("Another load is in flight; the last one to finish wins");
        }
        self.state.set_loading(true);

        let result = self.refresh_with(&filter).await;

        self.state.set_loading(false);
        match result {
            Ok(ref summary) => log::info!("Refresh complete: {:?}", summary),
            Err(ref e) => log::error!("Failed to load entries: {}", e),
        }
        result
    }

    async fn refresh_with(&self, filter: &EntryFilter) -> Result<RefreshSummary> {
        let fetched = self.client.fetch_entries(&filter.to_query()).await?;
        log::debug!("Received {} entries", fetched.len());

        // Categories may be missing after an earlier failure
        if self.state.snapshot().categories.is_empty()
            && let Err(e) = self.load_categories().await
        {
            log::warn!("Category reload failed: {}", e);
        }

        let matched = filter.apply(&fetched);
        let fetched_count = fetched.len();

        // Only an all-categories fetch describes the whole catalog
        if filter.is_all_categories() {
            self.state.update(|s| s.all_entries = fetched);
        }

        let written = self.persist(&matched);

        let matched_count = matched.len();
        let visible = if filter.is_active() {
            self.state.update(|s| s.entries = matched);
            matched_count
        } else {
            self.load_existing_entries()?
        };

        Ok(RefreshSummary {
            fetched: fetched_count,
            matched: matched_count,
            cached: written.unwrap_or(0),
            visible,
            cache_written: written.is_some(),
        })
    }

    /// Fetch categories and publish them
    pub async fn load_categories(&self) -> Result<usize> {
        let categories = self.client.fetch_categories().await?;
        let count = categories.len();

        log::info!("Loaded {} categories", count);
        self.state.update(|s| s.categories = categories);
        Ok(count)
    }

    /// Select a category (keeping text queries) and refresh
    pub async fn select_category(&self, category: &str) -> Result<RefreshSummary> {
        self.state.update(|s| s.filter.category = category.to_string());
        self.refresh().await
    }

    /// Clear every filter axis and refresh
    #[allow(dead_code)]
    pub async fn reset_filters(&self) -> Result<RefreshSummary> {
        log::info!("Resetting filters");
        self.state.update(|s| s.filter.reset());
        self.refresh().await
    }

    /// Quick search over the visible list by name, without fetching
    pub fn search_visible(&self, text: &str) -> Vec<ApiEntry> {
        self.state
            .snapshot()
            .entries
            .into_iter()
            .filter(|e| contains_ignore_case(&e.name, text))
            .collect()
    }

    /// Dashboard entries grouped under each known category.
    ///
    /// Categories without entries are skipped, and entries whose category
    /// is not in the category list are not shown.
    pub fn dashboard_sections(&self) -> Vec<DashboardSection> {
        let snapshot = self.state.snapshot();
        snapshot
            .categories
            .iter()
            .filter_map(|category| {
                let entries: Vec<ApiEntry> = snapshot
                    .all_entries
                    .iter()
                    .filter(|e| &e.category == category)
                    .cloned()
                    .collect();
                (!entries.is_empty()).then(|| DashboardSection {
                    category: category.clone(),
                    entries,
                })
            })
            .collect()
    }
}
