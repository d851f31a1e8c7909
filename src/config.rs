//! Configuration module for interface generation.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.ifacegen/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `IFACEGEN_` and use double
//! underscores to separate nested levels:
//! - `IFACEGEN_EXTRACTION__POOL_SIZE=4` sets `extraction.pool_size`
//! - `IFACEGEN_OUTPUT__STYLE=go` sets `output.style`
//! - `IFACEGEN_DEBUG=true` sets `debug`

use crate::assembly::InterfaceStyle;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".ifacegen";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "IFACEGEN_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default)]
    pub debug: bool,

    /// Source scanning configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Rendering and output file settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Number of files scanned simultaneously (0 = one per CPU)
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Extension (without dot) that marks a source file
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// File name suffix that marks a test file
    #[serde(default = "default_test_suffix")]
    pub test_suffix: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Extension appended to output file names that lack it
    #[serde(default = "default_source_extension")]
    pub file_extension: String,

    /// Interface header style
    #[serde(default)]
    pub style: InterfaceStyle,

    /// Create missing parent directories of the output file
    #[serde(default = "default_true")]
    pub create_dirs: bool,
}

fn default_version() -> u32 {
    1
}
fn default_pool_size() -> usize {
    10
}
fn default_source_extension() -> String {
    "go".to_string()
}
fn default_test_suffix() -> String {
    "_test.go".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            source_extension: default_source_extension(),
            test_suffix: default_test_suffix(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_extension: default_source_extension(),
            style: InterfaceStyle::default(),
            create_dirs: true,
        }
    }
}

impl ExtractionConfig {
    /// Worker count with the `0 = one per CPU` rule applied
    pub fn effective_pool_size(&self) -> usize {
        if self.pool_size == 0 {
            num_cpus::get()
        } else {
            self.pool_size
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref().to_path_buf())
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nesting levels, single underscores stay
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find `.ifacegen/settings.toml` in the current directory or its ancestors
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
