//! Layered application configuration.
//!
//! Settings are merged with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config FILE`, or `config.toml` in the platform
//!    config directory)
//! 3. `DUPESCAN_*` environment variables
//! 4. Command-line flags
//!
//! ```toml
//! sort_entries = true
//! skip_errors = false
//! timeout_secs = 300
//! output = "json"
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::scanner::TraverseConfig;
use crate::signal::ShutdownHandler;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DUPESCAN_";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Process directory entries in name order.
    pub sort_entries: bool,
    /// Log and skip unreadable entries instead of aborting.
    pub skip_errors: bool,
    /// Abort the scan after this many seconds.
    pub timeout_secs: Option<u64>,
    /// Report format.
    pub output: OutputFormat,
}

impl Config {
    /// Load configuration for a CLI invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--config` file does not exist, or if the config
    /// file or environment values cannot be parsed. The platform default
    /// file is optional.
    pub fn load(cli: &Cli) -> Result<Self> {
        if let Some(path) = &cli.config {
            ensure!(
                path.is_file(),
                "Configuration file not found: {}",
                path.display()
            );
        }
        let file = cli.config.clone().or_else(Self::default_path);
        let mut config = Self::figment(file.as_deref())
            .extract::<Self>()
            .context("Invalid configuration")?;
        config.apply_cli(cli);
        log::debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    /// Defaults, then the TOML file if given, then environment variables.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Command-line flags override everything else; unset flags leave the
    /// lower layers alone.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.sort {
            self.sort_entries = true;
        }
        if cli.skip_errors {
            self.skip_errors = true;
        }
        if let Some(secs) = cli.timeout {
            self.timeout_secs = Some(secs);
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
    }

    /// Traversal settings for this configuration, starting the timeout now.
    #[must_use]
    pub fn traverse_config(&self, shutdown: &ShutdownHandler) -> TraverseConfig {
        let mut config = TraverseConfig::default()
            .with_sorted_entries(self.sort_entries)
            .with_skip_errors(self.skip_errors)
            .with_shutdown_flag(shutdown.get_flag());
        if let Some(deadline) = self
            .timeout_secs
            .and_then(|secs| Instant::now().checked_add(Duration::from_secs(secs)))
        {
            config = config.with_deadline(deadline);
        }
        config
    }

    /// Render as a TOML document suitable for the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Platform-specific default config file location.
    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupescan", "dupescan")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_toml_layer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sort_entries = true\ntimeout_secs = 5\noutput = \"json\"\n").unwrap();

        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path))
            .extract()
            .unwrap();

        assert!(config.sort_entries);
        assert!(!config.skip_errors);
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output = \"xml\"\n").unwrap();

        let result: Result<Config, _> = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path))
            .extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config {
            output: OutputFormat::Json,
            ..Config::default()
        };
        let cli = Cli::try_parse_from(["dupescan", "--sort", "--output", "text", "--timeout", "9"])
            .unwrap();

        config.apply_cli(&cli);

        assert!(config.sort_entries);
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.timeout_secs, Some(9));
    }

    #[test]
    fn test_to_toml_round_trips_through_figment() {
        let config = Config {
            sort_entries: true,
            timeout_secs: Some(30),
            output: OutputFormat::Json,
            ..Config::default()
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("sort_entries = true"));
        assert!(text.contains("output = \"json\""));

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, text).unwrap();
        let loaded: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path))
            .extract()
            .unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("typo.toml");
        let cli =
            Cli::try_parse_from(["dupescan", "--config", missing.to_str().unwrap()]).unwrap();

        let err = Config::load(&cli).unwrap_err();

        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_traverse_config_sets_deadline() {
        let config = Config {
            timeout_secs: Some(60),
            skip_errors: true,
            ..Config::default()
        };
        let traverse = config.traverse_config(&ShutdownHandler::new());

        assert!(traverse.skip_errors);
        assert!(traverse.deadline.is_some());
        assert!(traverse.shutdown_flag.is_some());
    }
}
