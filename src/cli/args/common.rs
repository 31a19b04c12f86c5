//! Common CLI types shared across commands

use clap::ValueEnum;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    Pretty,
    /// Table format - one row per entry (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name.trim(), true).ok()
    }

    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}
