//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use completions::entry_name_value_candidates;

pub mod args;
pub mod cache;
pub mod completions;
pub mod context;
pub mod list;
pub mod open;
pub mod progress;
pub mod status;

pub use args::{EntryFilterArgs, GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// pubapi - browse the public APIs catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "pubapi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "PUBAPI_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "PUBAPI_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Catalog API base URL
    #[arg(long, global = true, env = "PUBAPI_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Directory for the entry cache
    #[arg(long, global = true, env = "PUBAPI_CACHE_DIR", hide_env = true)]
    pub cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "PUBAPI_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, filter and show catalog entries
    List {
        #[command(flatten)]
        filters: EntryFilterArgs,
    },

    /// Show every entry grouped by category
    Dashboard,

    /// List the catalog categories
    Categories,

    /// Open an entry's documentation link
    Open {
        /// Entry name (prompted for when omitted)
        #[arg(add = entry_name_value_candidates())]
        name: Option<String>,
    },

    /// Manage the local entry cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Show configuration and cache status
    Status,

    /// Display version information
    Version,

    /// Generate shell completions (static)
    #[command(after_help = "\
Static completions (subcommands/flags only):
  bash:   pubapi completion bash > /etc/bash_completion.d/pubapi
  zsh:    pubapi completion zsh > \"${fpath[1]}/_pubapi\"
  fish:   pubapi completion fish > ~/.config/fish/completions/pubapi.fish

Dynamic completions (entry names and categories from the local cache):
  bash:   echo 'source <(COMPLETE=bash pubapi)' >> ~/.bashrc
  zsh:    echo 'source <(COMPLETE=zsh pubapi)' >> ~/.zshrc
  fish:   echo 'COMPLETE=fish pubapi | source' >> ~/.config/fish/config.fish")]
    Completion {
        /// Shell to generate completions for (static only)
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,

    /// Remove every cached entry
    Clear,

    /// Print the cache database location
    Path,
}
