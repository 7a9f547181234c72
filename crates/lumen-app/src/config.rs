//! Application configuration.
//!
//! Loaded from TOML, then optionally overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LUMEN_LOADING_MESSAGE` | `loading.default_message` |
//! | `LUMEN_ONLINE` | `errors.initially_online` |
//! | `LUMEN_DARK` | `display.is_dark` |
//! | `LUMEN_SYSTEM_DARK` | `display.system_preference` |

use crate::display_mode::DisplayModeSeed;
use crate::error_store::RecoverabilityPolicy;
use crate::loading::DEFAULT_LOADING_MESSAGE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The TOML did not parse into [`AppConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be rendered back to TOML.
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    /// A value parsed but is not acceptable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// An override variable held something other than a boolean.
    #[error("environment variable {var} has unparsable value {value:?}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },
}

/// Loading store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Shown for start events that carry no message.
    pub default_message: String,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            default_message: DEFAULT_LOADING_MESSAGE.to_string(),
        }
    }
}

/// Error store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorsConfig {
    /// Connectivity assumed at construction.
    pub initially_online: bool,
    /// Recoverability for payloads that leave it unset.
    pub recoverable: RecoverabilityPolicy,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            initially_online: true,
            recoverable: RecoverabilityPolicy::default(),
        }
    }
}

/// Top-level configuration for all three stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `[loading]` section.
    pub loading: LoadingConfig,
    /// `[errors]` section.
    pub errors: ErrorsConfig,
    /// `[display]` section, seeding the display mode store.
    pub display: DisplayModeSeed,
}

impl AppConfig {
    /// Parse and validate a TOML document. Missing sections take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Apply `LUMEN_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(|name| std::env::var(name).ok())
    }

    /// Apply `LUMEN_*` overrides from an arbitrary lookup.
    pub fn merge_with_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(message) = lookup("LUMEN_LOADING_MESSAGE") {
            self.loading.default_message = message;
        }
        if let Some(value) = lookup("LUMEN_ONLINE") {
            self.errors.initially_online = parse_flag("LUMEN_ONLINE", value)?;
        }
        if let Some(value) = lookup("LUMEN_DARK") {
            self.display.is_dark = Some(parse_flag("LUMEN_DARK", value)?);
        }
        if let Some(value) = lookup("LUMEN_SYSTEM_DARK") {
            self.display.system_preference = Some(parse_flag("LUMEN_SYSTEM_DARK", value)?);
        }
        self.validate()
    }

    /// Reject values no store can work with, such as a blank default
    /// loading message.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loading.default_message.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "loading.default_message must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Env { var, value }),
    }
}
