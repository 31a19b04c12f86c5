//! Local bounded cache for catalog entries
//!
//! SQLite-backed, replaced wholesale on every refresh and capped at
//! [`storage::ENTRY_CACHE_LIMIT`] rows.

pub mod storage;

pub use storage::{CachedEntry, EntryStore};
