//! Configuration file handling.
//!
//! This module provides loading and saving of vulntext configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/vulntext/config.toml`
//! - macOS: `~/Library/Application Support/vulntext/config.toml`
//! - Windows: `%APPDATA%\vulntext\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_format = "text"
//! show = ["traces", "color"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::{OutputFormat, ShowOptions};

/// Application configuration.
///
/// Command-line flags take precedence over values loaded here.
///
/// # Example
///
/// ```no_run
/// use vulntext::Config;
///
/// let config = Config::load().unwrap();
/// println!("Default format: {:?}", config.default_format);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report format used when no `--format` flag is provided.
    ///
    /// Valid values: "text", "json"
    /// Default: "text"
    pub default_format: OutputFormat,

    /// Display options applied to every text report, e.g. `["traces"]`.
    ///
    /// Merged with any `--show` flags. Unknown options are ignored.
    pub show: Vec<String>,
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, falling back to defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Display options from the file merged with those given on the command line.
    pub fn show_options(&self, flags: &[String]) -> ShowOptions {
        ShowOptions::parse(self.show.iter().chain(flags))
    }

    /// Returns the path to the configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use vulntext::Config;
    ///
    /// let path = Config::config_path();
    /// println!("Config file: {}", path.display());
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vulntext")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
