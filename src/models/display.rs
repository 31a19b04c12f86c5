//! Display model implementations for table and JSON output

use serde::Serialize;
use tabled::Tabled;

use crate::catalog::DashboardSection;
use crate::client::ApiEntry;

const DESCRIPTION_WIDTH: usize = 48;

/// Truncate to `max_len` characters, marking the cut with `...`
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Catalog entry row.
///
/// The table shortens descriptions; JSON keeps the full text.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EntryDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "AUTH")]
    pub auth: String,

    #[tabled(rename = "HTTPS")]
    pub https: String,

    #[tabled(rename = "CORS")]
    pub cors: String,

    #[tabled(rename = "DESCRIPTION", display = "short_description")]
    pub description: String,

    #[tabled(rename = "LINK")]
    pub link: String,
}

fn short_description(description: &str) -> String {
    truncate_string(description, DESCRIPTION_WIDTH)
}

impl From<&ApiEntry> for EntryDisplay {
    fn from(entry: &ApiEntry) -> Self {
        Self {
            name: entry.name.clone(),
            category: entry.category.clone(),
            auth: match entry.auth.as_deref() {
                Some(auth) if !auth.is_empty() => auth.to_string(),
                _ => "No".to_string(),
            },
            https: yes_no(entry.https),
            cors: entry.cors.clone().unwrap_or_else(|| "-".to_string()),
            description: entry.description.clone(),
            link: entry.link.clone(),
        }
    }
}

impl From<ApiEntry> for EntryDisplay {
    fn from(entry: ApiEntry) -> Self {
        Self::from(&entry)
    }
}

/// Category row with the number of dashboard entries in it
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CategoryDisplay {
    #[tabled(rename = "CATEGORY")]
    pub name: String,

    #[tabled(rename = "ENTRIES")]
    pub entries: usize,
}

impl CategoryDisplay {
    /// Count entries per category; categories keep their given order
    pub fn tally(categories: &[String], entries: &[ApiEntry]) -> Vec<Self> {
        categories
            .iter()
            .map(|name| Self {
                name: name.clone(),
                entries: entries.iter().filter(|e| &e.category == name).count(),
            })
            .collect()
    }
}

/// Dashboard section in JSON output
#[derive(Debug, Clone, Serialize)]
pub struct SectionDisplay {
    pub category: String,
    pub count: usize,
    pub entries: Vec<EntryDisplay>,
}

impl From<DashboardSection> for SectionDisplay {
    fn from(section: DashboardSection) -> Self {
        Self {
            category: section.category,
            count: section.entries.len(),
            entries: section.entries.iter().map(EntryDisplay::from).collect(),
        }
    }
}
