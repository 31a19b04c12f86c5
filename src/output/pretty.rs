//! Human-oriented rich output

use colored::Colorize;

use crate::client::ApiEntry;

/// Render an entry as a multi-line card with transport and auth tags
pub fn entry_card(entry: &ApiEntry) -> String {
    let mut tags = vec![if entry.https {
        "HTTPS".green().to_string()
    } else {
        "HTTP".yellow().to_string()
    }];
    if entry.requires_auth()
        && let Some(ref auth) = entry.auth
    {
        tags.push(format!("🔒 {}", auth).green().to_string());
    }
    if let Some(ref cors) = entry.cors {
        tags.push(format!("CORS: {}", cors).dimmed().to_string());
    }

    format!(
        "{}\n  {}\n  Category: {}\n  {}\n  {}",
        entry.name.bold().blue(),
        entry.description,
        entry.category.cyan(),
        tags.join("  "),
        entry.link.dimmed()
    )
}

/// Render a list of entries as cards separated by blank lines
pub fn entry_cards(entries: &[ApiEntry]) -> String {
    if entries.is_empty() {
        return "No results found.".to_string();
    }
    entries
        .iter()
        .map(entry_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Section heading with a count, e.g. `Animals (12)`
pub fn heading(title: &str, count: usize) -> String {
    format!("{} ({})", title.bold(), count)
}
