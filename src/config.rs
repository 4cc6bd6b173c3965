//! Application configuration management.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (the platform config dir, or `--config FILE`)
//! 3. `DUPEFIND_*` environment variables
//! 4. Command-line flags (applied by the caller)
//!
//! ```toml
//! out_type = "csv"
//! in_type = "json"
//! progress = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::session::InputFormat;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DUPEFIND_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Format used when `--out-type` is not given.
    pub out_type: OutputFormat,
    /// Format used when `--in-type` is not given.
    pub in_type: InputFormat,
    /// Show a progress spinner while scanning.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_type: OutputFormat::Plain,
            in_type: InputFormat::Json,
            progress: true,
        }
    }
}

impl Config {
    /// Load the configuration, from `explicit` if given, otherwise from the
    /// platform-specific default path if it exists.
    ///
    /// # Errors
    ///
    /// Fails if `explicit` does not exist, or if any layer holds a value
    /// that does not fit the schema.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::default_path(),
        };
        Self::load_from_path(path.as_deref())
    }

    /// Load defaults, then `path` (skipped if missing), then the environment.
    ///
    /// # Errors
    ///
    /// Fails if the file is not valid TOML or a value has the wrong type.
    pub fn load_from_path(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            log::debug!("Reading config from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .context("Invalid configuration")
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupefind", "dupefind")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
