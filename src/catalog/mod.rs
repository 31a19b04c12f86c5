//! Catalog pipeline: filtering, observable state and refresh orchestration

pub mod filter;
pub mod refresh;
pub mod state;

pub use filter::{EntryFilter, filter_entries, sort_by_name};
pub use refresh::{Catalog, DashboardSection};
pub use state::SnapshotReceiver;

/// Category sentinel meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";
