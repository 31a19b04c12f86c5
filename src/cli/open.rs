//! Open an entry's documentation link

use colored::Colorize;
use dialoguer::{Select, theme::ColorfulTheme};
use serde::Serialize;

use crate::browser::{BrowserSession, HttpSurface, LoadOutcome, NavigationState};
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::ApiEntry;
use crate::error::{Error, Result};
use crate::output::json::format_json;

#[derive(Serialize)]
struct OpenReport<'a> {
    entry: &'a str,
    link: &'a str,
    #[serde(flatten)]
    outcome: &'a LoadOutcome,
    navigation: NavigationState,
}

/// Resolve an entry by name (or prompt for one) and load its link
pub async fn run(opts: &GlobalOptions, name: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let entry = match name {
        Some(name) => find_entry(&ctx, name)?,
        None => pick_entry(&ctx.catalog.snapshot().entries)?,
    };
    let Some(entry) = entry else {
        return Ok(());
    };

    let surface = HttpSurface::new(ctx.config.timeout())?;
    let mut session = BrowserSession::new(surface, ctx.config.load_timeout());
    let outcome = session.load(&entry.link).await?;

    match ctx.format {
        OutputFormat::Json => {
            let report = OpenReport {
                entry: &entry.name,
                link: &entry.link,
                outcome: &outcome,
                navigation: session.state(),
            };
            println!("{}", format_json(&report)?);
        }
        _ => print_outcome(&entry, &outcome),
    }
    Ok(())
}

/// Exact (case-insensitive) match from the cache, else a unique
/// case-insensitive substring match among the visible entries
fn find_entry(ctx: &CommandContext, name: &str) -> Result<Option<ApiEntry>> {
    if let Some(row) = ctx.catalog.with_store(|store| store.find_by_name(name))? {
        return Ok(Some(row.into()));
    }

    let candidates = ctx.catalog.search_visible(name);
    match candidates.as_slice() {
        [only] => Ok(Some(only.clone())),
        [] => Err(Error::Other(format!(
            "No cached entry named '{}'. Run 'pubapi list' first.",
            name
        ))),
        many => Err(Error::Other(format!(
            "'{}' matches {} entries: {}",
            name,
            many.len(),
            many.iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

fn pick_entry(entries: &[ApiEntry]) -> Result<Option<ApiEntry>> {
    if entries.is_empty() {
        return Err(Error::Other("The cache is empty. Run 'pubapi list' first.".to_string()));
    }

    let labels: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({})", e.name, e.category))
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select an API")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|idx| entries[idx].clone()))
}

fn print_outcome(entry: &ApiEntry, outcome: &LoadOutcome) {
    println!("{}", entry.name.bold());
    println!("  {}", entry.link.cyan());
    match outcome {
        LoadOutcome::Loaded(page) => {
            let mark = if (200..400).contains(&page.status) {
                "✓".green()
            } else {
                "✗".red()
            };
            println!("{} HTTP {}", mark, page.status);
            if let Some(ref title) = page.title {
                println!("  Title: {}", title);
            }
            if page.url != entry.link {
                println!("  Redirected to {}", page.url.dimmed());
            }
            if let Some(ref content_type) = page.content_type {
                println!("  {} ({} bytes)", content_type.dimmed(), page.size_bytes);
            }
        }
        LoadOutcome::TimedOut { .. } => {
            println!("{} Still loading, gave up waiting", "⚠".yellow());
        }
    }
}
