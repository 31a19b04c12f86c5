//! Command execution context
//!
//! Loads configuration once and wires the catalog client, entry store and
//! orchestrator that the catalog commands share.

use std::sync::Arc;

use crate::cache::EntryStore;
use crate::catalog::Catalog;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::CatalogClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Catalog orchestrator over the live client and the on-disk cache
    pub catalog: Catalog<CatalogClient>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Build the context from global options.
    ///
    /// # Errors
    /// Returns error if the config file is invalid or the cache cannot be opened.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let format = opts.resolve_format(config.preferences.format.as_deref());

        let host = config.api_host(opts.api_host_ref());
        log::debug!("Using catalog host {}", host);
        let client = CatalogClient::with_host(Some(host), config.timeout())?;

        let store = open_store(&config, opts)?;
        let catalog = Catalog::new(Arc::new(client), store);

        Ok(Self {
            config,
            catalog,
            format,
        })
    }
}

/// Open the entry store in the effective cache directory
pub fn open_store(config: &Config, opts: &GlobalOptions) -> Result<EntryStore> {
    let store = match config.cache_dir(opts.cache_dir_ref()) {
        Some(dir) => EntryStore::open_at(&dir)?,
        None => EntryStore::open()?,
    };
    Ok(store)
}
