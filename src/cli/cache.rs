//! Cache management commands

use std::path::PathBuf;

use crate::cache::EntryStore;
use crate::cli::context::open_store;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Show cache status/statistics
pub fn status(opts: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let config = Config::load_at(opts.config_ref())?;
    let store = open_store(&config, opts)?;
    let stats = store.stats()?;
    let path = db_location(&store);

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries": stats.entries,
                "capacity": stats.capacity,
                "categories": stats.categories,
                "size_bytes": stats.size_bytes,
                "size_human": format_size(stats.size_bytes),
                "last_refresh_timestamp": stats.last_refresh,
                "path": path,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", path);
            println!("Entries:        {} / {}", stats.entries, stats.capacity);
            println!("Categories:     {}", stats.categories);
            println!("Total size:     {}", format_size(stats.size_bytes));

            if let Some(refreshed) = stats.last_refresh {
                println!("Last refresh:   {}", format_local(refreshed));
            }
        }
    }

    Ok(())
}

/// Remove every cached entry
pub fn clear(opts: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let config = Config::load_at(opts.config_ref())?;
    let store = open_store(&config, opts)?;
    let stats = store.clear_all()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!("Cleared {} cached entries", stats.entries_removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Print the cache database location
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let config = Config::load_at(opts.config_ref())?;
    let store = open_store(&config, opts)?;
    println!("{}", db_location(&store));
    Ok(())
}

fn db_location(store: &EntryStore) -> String {
    store
        .db_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string())
}

/// Unix seconds as local `YYYY-MM-DD HH:MM`
fn format_local(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Format bytes as human-readable size
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Cache directory that would be used for these options, without opening it
pub fn resolve_dir(opts: &GlobalOptions, config: &Config) -> Result<PathBuf> {
    match config.cache_dir(opts.cache_dir_ref()) {
        Some(dir) => Ok(dir),
        None => Ok(EntryStore::cache_dir()?),
    }
}
