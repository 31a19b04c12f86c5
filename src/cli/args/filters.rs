//! Filter argument types for catalog commands

use clap::Args;

use crate::catalog::EntryFilter;
use crate::cli::completions::category_value_candidates;

/// Filters for the `list` command.
///
/// The category narrows the request server-side; name and description are
/// case-insensitive substring matches applied after the fetch.
#[derive(Args, Debug, Default, Clone)]
pub struct EntryFilterArgs {
    /// Keep entries whose name contains this text
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Keep entries whose description contains this text
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Only fetch entries of this category ("All" for every category)
    #[arg(long, short = 'c', add = category_value_candidates())]
    pub category: Option<String>,

    /// Narrow the shown list by name without changing what gets cached
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Show cached entries without contacting the API
    #[arg(long)]
    pub offline: bool,
}

impl EntryFilterArgs {
    pub fn to_filter(&self) -> EntryFilter {
        EntryFilter::new(
            self.name.as_deref(),
            self.description.as_deref(),
            self.category.as_deref(),
        )
    }
}
