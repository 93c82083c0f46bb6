//! Configuration management for the status registry
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (status.toml)
//! - Environment variables (STATUS__*)
//!
//! ## Example config file (status.toml):
//! ```toml
//! [registry]
//! silent_mode = false
//! seed_defaults = true
//! unique_codes = false
//!
//! [statuses.success]
//! 201 = "Created"
//!
//! [statuses.error]
//! 418 = "I'm a teapot"
//!
//! [logging]
//! filter = "info"
//!
//! [output]
//! format = "pretty"
//! ```

use std::collections::BTreeMap;

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::severity::Severity;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Extra statuses layered over the defaults
    #[serde(default)]
    pub statuses: StatusOverrides,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Suppress reporter output unless a call overrides it
    #[serde(default)]
    pub silent_mode: bool,

    /// Start from the built-in status table
    #[serde(default = "default_true")]
    pub seed_defaults: bool,

    /// Reject a code that is already registered under another class
    #[serde(default)]
    pub unique_codes: bool,
}

/// Status codes keyed by class, codes written as table keys
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusOverrides {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub success: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub warn: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub error: BTreeMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    /// Render a serializable value in this format
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Compact => serde_json::to_string(value)?,
        };
        Ok(rendered)
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            silent_mode: false,
            seed_defaults: true,
            unique_codes: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl StatusOverrides {
    /// Parsed entries, classes in scan order
    pub fn entries(&self) -> Result<Vec<(Severity, i64, String)>> {
        let tables = [
            (Severity::Success, &self.success),
            (Severity::Warn, &self.warn),
            (Severity::Error, &self.error),
        ];

        let mut entries = Vec::new();
        for (severity, table) in tables {
            for (key, message) in table {
                let code = key
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| SchemaError::InvalidCode(key.clone()))?;
                entries.push((severity, code, message.clone()));
            }
        }
        Ok(entries)
    }
}

impl StatusConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["status.toml", ".status.toml", "config/status.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "status-logger", "status") {
            let xdg_config = config_dir.config_dir().join("status.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Environment variables (STATUS__*)
        builder = builder.add_source(
            Environment::with_prefix("STATUS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
