//! Catalog API data models
//!
//! Wire records use the catalog's capitalized field names (`API`, `HTTPS`, ...).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// One public API catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEntry {
    /// Local identifier, assigned fresh on every decode
    #[serde(skip_deserializing, default = "Uuid::new_v4")]
    pub id: Uuid,

    /// API name
    #[serde(rename = "API")]
    pub name: String,

    /// Short description
    #[serde(rename = "Description")]
    pub description: String,

    /// Auth scheme ("apiKey", "OAuth", "" or "No")
    #[serde(rename = "Auth", default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,

    /// Whether the API is served over HTTPS
    #[serde(rename = "HTTPS")]
    pub https: bool,

    /// CORS policy ("Yes", "No", "Unknown")
    #[serde(
        rename = "Cors",
        alias = "CORS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cors: Option<String>,

    /// Documentation link
    #[serde(rename = "Link")]
    pub link: String,

    /// Catalog category
    #[serde(rename = "Category")]
    pub category: String,
}

impl ApiEntry {
    /// Build an entry with a fresh identifier
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        auth: Option<&str>,
        https: bool,
        cors: Option<&str>,
        link: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            auth: auth.map(str::to_string),
            https,
            cors: cors.map(str::to_string),
            link: link.into(),
            category: category.into(),
        }
    }

    /// True when the entry needs some form of authentication
    pub fn requires_auth(&self) -> bool {
        matches!(self.auth.as_deref(), Some(a) if !a.is_empty() && a != "No")
    }
}

/// Entry list in either of the two shapes the backend returns.
///
/// A plain listing is an array, and can contain `null` holes when keys are
/// sparse. A filtered query returns an object keyed by the record's key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntryList {
    List(Vec<Option<ApiEntry>>),
    Keyed(HashMap<String, ApiEntry>),
}

impl EntryList {
    fn into_entries(self) -> Vec<ApiEntry> {
        match self {
            EntryList::List(items) => items.into_iter().flatten().collect(),
            EntryList::Keyed(map) => map.into_values().collect(),
        }
    }
}

/// Decode an entries response body. A `null` body means an empty catalog.
pub fn decode_entries(body: &[u8]) -> Result<Vec<ApiEntry>, ApiError> {
    let list: Option<EntryList> = serde_json::from_slice(body).map_err(|e| {
        ApiError::Decode(format!(
            "expected an array or an object of entries ({})",
            e
        ))
    })?;
    Ok(list.map(EntryList::into_entries).unwrap_or_default())
}

/// Response body of the categories endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Query for an entries fetch.
///
/// Only `category` is sent to the server; name and description are matched locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl EntryQuery {
    /// Query for the whole catalog
    pub fn all() -> Self {
        Self::default()
    }

    /// Category to push to the server, if it narrows the result
    pub fn server_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != crate::catalog::ALL_CATEGORIES)
    }
}
