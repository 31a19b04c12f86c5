//! Client-side entry filtering and ordering

use std::cmp::Ordering;

use serde::Serialize;

use super::ALL_CATEGORIES;
use crate::client::{ApiEntry, EntryQuery};

/// Active filter selection for the entry list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFilter {
    /// Substring to match against the entry name
    pub name_query: String,
    /// Substring to match against the description
    pub description_query: String,
    /// Selected category, or [`ALL_CATEGORIES`]
    pub category: String,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            name_query: String::new(),
            description_query: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl EntryFilter {
    /// Build a filter from optional CLI-style inputs.
    ///
    /// Missing or blank category means [`ALL_CATEGORIES`].
    pub fn new(name: Option<&str>, description: Option<&str>, category: Option<&str>) -> Self {
        Self {
            name_query: name.unwrap_or_default().to_string(),
            description_query: description.unwrap_or_default().to_string(),
            category: category
                .filter(|c| !c.is_empty())
                .unwrap_or(ALL_CATEGORIES)
                .to_string(),
        }
    }

    /// True when any axis narrows the result
    pub fn is_active(&self) -> bool {
        !self.name_query.is_empty()
            || !self.description_query.is_empty()
            || self.category != ALL_CATEGORIES
    }

    /// True when the category axis does not narrow the fetch
    pub fn is_all_categories(&self) -> bool {
        self.category.is_empty() || self.category == ALL_CATEGORIES
    }

    /// Clear every axis
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fetch query for this filter
    pub fn to_query(&self) -> EntryQuery {
        EntryQuery {
            name: Some(self.name_query.clone()).filter(|s| !s.is_empty()),
            description: Some(self.description_query.clone()).filter(|s| !s.is_empty()),
            category: Some(self.category.clone()),
        }
    }

    /// Apply the name and description axes to `entries`
    pub fn apply(&self, entries: &[ApiEntry]) -> Vec<ApiEntry> {
        filter_entries(
            entries,
            Some(self.name_query.as_str()),
            Some(self.description_query.as_str()),
        )
    }

    /// Apply every axis, category included, to already-fetched entries
    pub fn apply_local(&self, entries: &[ApiEntry]) -> Vec<ApiEntry> {
        let mut matched = self.apply(entries);
        if !self.is_all_categories() {
            matched.retain(|e| e.category.eq_ignore_ascii_case(&self.category));
        }
        matched
    }
}

/// Case-insensitive substring test; an empty needle always matches
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep entries whose name and description contain the given queries.
///
/// Both axes are case-insensitive and combine with AND. Empty or missing
/// queries do not filter. Category is not checked here.
pub fn filter_entries(
    entries: &[ApiEntry],
    name_query: Option<&str>,
    description_query: Option<&str>,
) -> Vec<ApiEntry> {
    let name_query = name_query.unwrap_or_default();
    let description_query = description_query.unwrap_or_default();

    let filtered: Vec<ApiEntry> = entries
        .iter()
        .filter(|e| contains_ignore_case(&e.name, name_query))
        .filter(|e| contains_ignore_case(&e.description, description_query))
        .cloned()
        .collect();

    log::debug!(
        "Filtered entries: {} of {} (name={:?}, description={:?})",
        filtered.len(),
        entries.len(),
        name_query,
        description_query
    );
    filtered
}

/// Case-insensitive name ordering, falling back to the raw name for ties
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort entries by name ascending (case-insensitive, stable)
pub fn sort_by_name(entries: &mut [ApiEntry]) {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
}
