//! YAML configuration file support.
//!
//! A single file configures winnowing and logging. Every field has a serde
//! default, so a file only needs to name what it changes.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "source code submissions"
//!
//! winnow:
//!   version: 1
//!   k: 5
//!   w: 4
//!   hash_bits: 16
//!   seed: 0
//!   strip_whitespace: true
//!   include_intermediates: false
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use winnow_core::{HashWidth, WinnowConfig, DEFAULT_K, DEFAULT_W};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct MossConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub winnow: WinnowYamlConfig,

    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl MossConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: MossConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the core configuration described by the `winnow` section.
    pub fn winnow_config(&self) -> Result<WinnowConfig, ConfigLoadError> {
        self.winnow.to_winnow_config()
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.winnow.validate()?;
        Ok(())
    }
}

impl Default for MossConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            winnow: WinnowYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

/// Winnowing YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnowYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default = "default_w")]
    pub w: usize,

    #[serde(default = "default_hash_bits")]
    pub hash_bits: u8,

    #[serde(default)]
    pub seed: u64,

    #[serde(default)]
    pub strip_whitespace: bool,

    #[serde(default = "true_value")]
    pub include_intermediates: bool,
}

impl WinnowYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_winnow_config().map(|_| ())
    }

    /// Convert into the core configuration, validating every field.
    pub fn to_winnow_config(&self) -> Result<WinnowConfig, ConfigLoadError> {
        let hash_width = HashWidth::try_from(self.hash_bits)
            .map_err(|err| ConfigLoadError::Validation(format!("winnow.hash_bits: {err}")))?;

        let cfg = WinnowConfig {
            version: self.version,
            k: self.k,
            w: self.w,
            hash_width,
            seed: self.seed,
            strip_whitespace: self.strip_whitespace,
            include_intermediates: self.include_intermediates,
        };
        cfg.validate()
            .map_err(|err| ConfigLoadError::Validation(format!("winnow: {err}")))?;
        Ok(cfg)
    }
}

impl Default for WinnowYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: DEFAULT_K,
            w: DEFAULT_W,
            hash_bits: 16,
            seed: 0,
            strip_whitespace: false,
            include_intermediates: true,
        }
    }
}

/// Logging YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingYamlConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"mossfp=debug"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable logs.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_version() -> u32 {
    1
}

fn default_k() -> usize {
    DEFAULT_K
}

fn default_w() -> usize {
    DEFAULT_W
}

fn default_hash_bits() -> u8 {
    16
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn true_value() -> bool {
    true
}
