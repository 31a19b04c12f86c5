//! Catalog browsing commands: list, dashboard and categories

use colored::Colorize;

use crate::catalog::{ALL_CATEGORIES, Catalog, DashboardSection, EntryFilter};
use crate::cli::progress::LoadingIndicator;
use crate::cli::{CommandContext, EntryFilterArgs, GlobalOptions, OutputFormat};
use crate::client::{ApiEntry, CatalogApi};
use crate::error::Result;
use crate::models::{CategoryDisplay, EntryDisplay, SectionDisplay};
use crate::output::json::{DataSource, format_json_from};
use crate::output::{Formattable, pretty, table};

/// Fetch with the given filters and print the visible entries.
///
/// A failed fetch is not fatal: the warning goes to stderr and the cached
/// entries are shown instead.
pub async fn list(opts: &GlobalOptions, filters: &EntryFilterArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let filter = filters.to_filter();

    let (entries, source) = if filters.offline {
        log::debug!("Offline mode, reading cache only");
        let matched = filter.apply_local(&ctx.catalog.snapshot().entries);
        let shown = match filters.search.as_deref() {
            Some(text) => search(&matched, text),
            None => matched,
        };
        (shown, DataSource::Cache)
    } else {
        // Text queries first; a specific category goes through select_category
        let category = (!filter.is_all_categories()).then(|| filter.category.clone());
        ctx.catalog.set_filter(EntryFilter {
            category: ALL_CATEGORIES.to_string(),
            ..filter
        });
        let source = match refresh_with_spinner(&ctx.catalog, ctx.format, category.as_deref())
            .await
        {
            Ok(()) => DataSource::Network,
            Err(e) => {
                warn_stale(&e.to_string());
                DataSource::Cache
            }
        };
        let shown = match filters.search.as_deref() {
            Some(text) => ctx.catalog.search_visible(text),
            None => ctx.catalog.snapshot().entries,
        };
        (shown, source)
    };

    print_entries(&entries, ctx.format, source)?;
    if !ctx.format.is_json() {
        print_footer(entries.len(), ctx.catalog.snapshot().is_filter_active(), source);
    }
    Ok(())
}

/// Load everything and print entries grouped by category
pub async fn dashboard(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    load_initial_with_spinner(&ctx.catalog, ctx.format).await?;

    let sections = ctx.catalog.dashboard_sections();
    let total: usize = sections.iter().map(|s| s.entries.len()).sum();
    let section_count = sections.len();

    print_sections(sections, ctx.format)?;
    if !ctx.format.is_json() {
        eprintln!(
            "{}",
            format!("{} entries in {} categories", total, section_count).dimmed()
        );
    }
    Ok(())
}

/// Load everything and print categories with their entry counts
pub async fn categories(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    load_initial_with_spinner(&ctx.catalog, ctx.format).await?;

    let snapshot = ctx.catalog.snapshot();
    let rows = CategoryDisplay::tally(&snapshot.categories, &snapshot.all_entries);
    match ctx.format {
        OutputFormat::Pretty => {
            for row in &rows {
                println!("{} {}", row.name.cyan(), format!("({})", row.entries).dimmed());
            }
            Ok(())
        }
        format => rows.print(format),
    }
}

async fn refresh_with_spinner<C: CatalogApi>(
    catalog: &Catalog<C>,
    format: OutputFormat,
    category: Option<&str>,
) -> Result<()> {
    let spinner =
        LoadingIndicator::attach(catalog.subscribe(), "Loading entries...", !format.is_json());
    let result = match category {
        Some(category) => catalog.select_category(category).await,
        None => catalog.refresh().await,
    };
    spinner.finish().await;

    let summary = result?;
    if !summary.cache_written {
        eprintln!("{} Could not update the local cache", "⚠".yellow());
        eprintln!("  → Run with --debug for details");
    }
    log::debug!(
        "Fetched {}, matched {}, cached {}, showing {}",
        summary.fetched,
        summary.matched,
        summary.cached,
        summary.visible
    );
    Ok(())
}

async fn load_initial_with_spinner<C: CatalogApi>(
    catalog: &Catalog<C>,
    format: OutputFormat,
) -> Result<()> {
    let spinner =
        LoadingIndicator::attach(catalog.subscribe(), "Loading catalog...", !format.is_json());
    let result = catalog.load_initial().await;
    spinner.finish().await;
    result
}

fn search(entries: &[ApiEntry], text: &str) -> Vec<ApiEntry> {
    crate::catalog::filter_entries(entries, Some(text), None)
}

fn warn_stale(reason: &str) {
    eprintln!("{} Could not reach the catalog: {}", "⚠".yellow(), reason);
    eprintln!("  → Showing cached entries");
}

fn print_footer(shown: usize, filtered: bool, source: DataSource) {
    let scope = match (filtered, source) {
        (_, DataSource::Cache) => "from cache",
        (true, DataSource::Network) => "matching filters",
        (false, DataSource::Network) => "most recent",
    };
    eprintln!("{}", format!("{} entries {}", shown, scope).dimmed());
}

fn print_entries(entries: &[ApiEntry], format: OutputFormat, source: DataSource) -> Result<()> {
    match format {
        OutputFormat::Pretty => println!("{}", pretty::entry_cards(entries)),
        OutputFormat::Table => {
            let rows: Vec<EntryDisplay> = entries.iter().map(EntryDisplay::from).collect();
            rows.print(format)?;
        }
        OutputFormat::Json => {
            let rows: Vec<EntryDisplay> = entries.iter().map(EntryDisplay::from).collect();
            println!("{}", format_json_from(&rows, source)?);
        }
    }
    Ok(())
}

fn print_sections(sections: Vec<DashboardSection>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            if sections.is_empty() {
                println!("No results found.");
            }
            for section in &sections {
                println!("{}\n", pretty::heading(&section.category, section.entries.len()));
                println!("{}\n", pretty::entry_cards(&section.entries));
            }
        }
        OutputFormat::Table => {
            let tables: Vec<(String, Vec<EntryDisplay>)> = sections
                .iter()
                .map(|s| {
                    (
                        s.category.clone(),
                        s.entries.iter().map(EntryDisplay::from).collect(),
                    )
                })
                .collect();
            println!("{}", table::format_sections(&tables));
        }
        OutputFormat::Json => {
            let display: Vec<SectionDisplay> =
                sections.into_iter().map(SectionDisplay::from).collect();
            println!("{}", format_json_from(&display, DataSource::Network)?);
        }
    }
    Ok(())
}
