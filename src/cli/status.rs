//! Status command implementation

use colored::Colorize;

use crate::cache::EntryStore;
use crate::cli::GlobalOptions;
use crate::cli::cache::resolve_dir;
use crate::config::{Config, DEFAULT_API_HOST};
use crate::error::Result;

/// Display configuration and cache status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "pubapi Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            if config_path.exists() {
                println!(
                    "{} Config file: {}",
                    "✓".green(),
                    config_path.display().to_string().cyan()
                );
            } else {
                println!(
                    "{} No config file at {} (using defaults)",
                    "○".dimmed(),
                    config_path.display()
                );
            }
            config
        }
        Err(e) => {
            println!("{} Config file invalid: {}", "✗".red(), e);
            println!("  → Fix or remove {}", config_path.display());
            println!();
            return Ok(());
        }
    };

    let host = config.api_host(opts.api_host_ref());
    if host == DEFAULT_API_HOST {
        println!("{} API host: {}", "✓".green(), host);
    } else {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }
    println!(
        "{} Timeouts: request {}s, page load {}s",
        "○".dimmed(),
        config.timeout_secs,
        config.browser.load_timeout_secs
    );

    let dir = resolve_dir(opts, &config)?;
    match EntryStore::open_at(&dir).and_then(|store| store.stats()) {
        Ok(stats) if stats.entries > 0 => {
            println!(
                "{} Cache: {} of {} entries in {}",
                "✓".green(),
                stats.entries,
                stats.capacity,
                dir.display().to_string().cyan()
            );
        }
        Ok(_) => {
            println!("{} Cache is empty", "○".dimmed());
            println!("  → Run 'pubapi list' to fill it");
        }
        Err(e) => {
            println!("{} Cache unavailable: {}", "✗".red(), e);
        }
    }

    println!();
    Ok(())
}
