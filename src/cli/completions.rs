//! Dynamic shell completions
//!
//! Entry names and categories are completed from the local entry cache, so
//! pressing TAB never touches the network. A missing or unreadable cache
//! simply yields no candidates.

use std::path::PathBuf;

use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};

use crate::cache::{CachedEntry, EntryStore};
use crate::config::Config;

/// Cached rows, honoring the same cache dir overrides as normal commands
fn cached_rows() -> Vec<CachedEntry> {
    let config_path = std::env::var("PUBAPI_CONFIG").ok();
    let config = Config::load_at(config_path.as_deref()).unwrap_or_default();
    let dir_override = std::env::var_os("PUBAPI_CACHE_DIR").map(PathBuf::from);

    let store = match config.cache_dir(dir_override.as_deref()) {
        Some(dir) => EntryStore::open_at(&dir),
        None => EntryStore::open(),
    };
    store
        .and_then(|store| store.load_all())
        .unwrap_or_default()
}

/// Complete entry names, with the category as help text
pub fn complete_entry_names() -> Vec<CompletionCandidate> {
    entry_name_candidates(&cached_rows())
}

/// Complete category names seen in the cache
pub fn complete_categories() -> Vec<CompletionCandidate> {
    category_candidates(&cached_rows())
}

fn entry_name_candidates(rows: &[CachedEntry]) -> Vec<CompletionCandidate> {
    rows.iter()
        .map(|row| {
            CompletionCandidate::new(row.name.clone()).help(Some(row.category.clone().into()))
        })
        .collect()
}

fn category_candidates(rows: &[CachedEntry]) -> Vec<CompletionCandidate> {
    let mut categories: Vec<&str> = rows.iter().map(|row| row.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();
    categories.into_iter().map(CompletionCandidate::new).collect()
}

/// Create completion candidates for entry names.
pub fn entry_name_value_candidates() -> ArgValueCandidates {
    ArgValueCandidates::new(complete_entry_names)
}

/// Create completion candidates for categories.
pub fn category_value_candidates() -> ArgValueCandidates {
    ArgValueCandidates::new(complete_categories)
}
