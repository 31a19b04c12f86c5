//! Global CLI options shared across all commands

use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct holds the flag/env layer; the config file is merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit output format; `None` defers to the config file
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.pubapi/config.yaml)
    pub config: Option<String>,

    /// Catalog API host override
    pub api_host: Option<String>,

    /// Cache directory override
    pub cache_dir: Option<PathBuf>,

    pub debug: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
            cache_dir: cli.cache_dir.clone(),
            debug: cli.debug,
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    pub fn cache_dir_ref(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Output format: flag/env, then the config preference, then table
    pub fn resolve_format(&self, preferred: Option<&str>) -> OutputFormat {
        self.format
            .or_else(|| preferred.and_then(OutputFormat::from_name))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_accessors() {
        let opts = GlobalOptions {
            format: Some(OutputFormat::Json),
            config: Some("/custom/config.yaml".to_string()),
            api_host: Some("http://localhost:8080".to_string()),
            cache_dir: Some(PathBuf::from("/tmp/pubapi")),
            debug: true,
        };

        assert_eq!(opts.config_ref(), Some("/custom/config.yaml"));
        assert_eq!(opts.api_host_ref(), Some("http://localhost:8080"));
        assert_eq!(opts.cache_dir_ref(), Some(Path::new("/tmp/pubapi")));
    }

    #[test]
    fn test_global_options_none_accessors() {
        let opts = GlobalOptions::default();

        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.api_host_ref(), None);
        assert_eq!(opts.cache_dir_ref(), None);
        assert!(!opts.debug);
    }

    #[test]
    fn test_resolve_format_precedence() {
        let flagged = GlobalOptions {
            format: Some(OutputFormat::Pretty),
            ..Default::default()
        };
        assert_eq!(flagged.resolve_format(Some("json")), OutputFormat::Pretty);

        let unflagged = GlobalOptions::default();
        assert_eq!(unflagged.resolve_format(Some("json")), OutputFormat::Json);
        assert_eq!(unflagged.resolve_format(Some("bogus")), OutputFormat::Table);
        assert_eq!(unflagged.resolve_format(None), OutputFormat::Table);
    }
}
