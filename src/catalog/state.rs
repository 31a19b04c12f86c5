//! Observable catalog state
//!
//! Views read a [`CatalogSnapshot`] and subscribe for a new one after every
//! mutation instead of binding to shared mutable fields.

use std::sync::RwLock;

use serde::Serialize;
use tokio::sync::broadcast;

use super::EntryFilter;
use crate::client::ApiEntry;

/// Subscriber channel depth; slow subscribers skip to the latest snapshot
const CHANNEL_CAPACITY: usize = 64;

pub type SnapshotReceiver = broadcast::Receiver<CatalogSnapshot>;

/// Point-in-time view of the catalog
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogSnapshot {
    /// A fetch is in flight
    pub is_loading: bool,
    /// Known categories, as fetched
    pub categories: Vec<String>,
    /// Entries shown in the list view
    pub entries: Vec<ApiEntry>,
    /// Every entry of the last all-categories fetch, for the dashboard
    pub all_entries: Vec<ApiEntry>,
    /// Filter that produced `entries`
    pub filter: EntryFilter,
}

impl CatalogSnapshot {
    /// True when any filter axis narrows the list
    pub fn is_filter_active(&self) -> bool {
        self.filter.is_active()
    }
}

/// State store with subscribe/notify
pub struct CatalogState {
    current: RwLock<CatalogSnapshot>,
    tx: broadcast::Sender<CatalogSnapshot>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogState {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            current: RwLock::new(CatalogSnapshot::default()),
            tx,
        }
    }

    /// Subscribe to snapshots published after each mutation
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.tx.subscribe()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> CatalogSnapshot {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply a mutation and notify subscribers
    pub fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut CatalogSnapshot),
    {
        let snapshot = {
            let mut guard = match self.current.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            mutate(&mut guard);
            guard.clone()
        };
        // No receivers is fine
        let _ = self.tx.send(snapshot);
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|s| s.is_loading = loading);
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().is_loading
    }
}
