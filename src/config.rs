//! Configuration module for modelconf.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `MODELCONF_` and use double underscores
//! to separate nested levels:
//! - `MODELCONF_MODEL__ROOT_CLASS=Site` sets `model.root_class`
//! - `MODELCONF_PATCH__MODE=in-place` sets `patch.mode`
//! - `MODELCONF_OUTPUT_DIR=build` sets `output_dir`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::delta::PatchMode;
use crate::export::CardinalityPolicy;
use crate::io::XmlOptions;

/// Directory holding the settings file, searched for from the cwd upwards.
pub const CONFIG_DIR: &str = ".modelconf";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "MODELCONF_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory the input files are read from
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory generated files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Model materialization settings
    #[serde(default)]
    pub model: ModelConfig,

    /// File names inside the input and output directories
    #[serde(default)]
    pub files: FilesConfig,

    /// Delta application settings
    #[serde(default)]
    pub patch: PatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ModelConfig {
    /// Class the nested document is rooted at
    #[serde(default = "default_root_class")]
    pub root_class: String,

    /// Tie-break when a class has several multiplicity tokens
    #[serde(default)]
    pub cardinality: CardinalityPolicy,

    /// Spaces per nesting level in the generated XML
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Emit the `<?xml ...?>` declaration
    #[serde(default = "default_true")]
    pub xml_declaration: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilesConfig {
    #[serde(default = "default_model_file")]
    pub model: String,
    #[serde(default = "default_config_xml_file")]
    pub config_xml: String,
    #[serde(default = "default_metadata_file")]
    pub metadata: String,
    #[serde(default = "default_base_config_file")]
    pub base_config: String,
    #[serde(default = "default_patched_config_file")]
    pub patched_config: String,
    #[serde(default = "default_delta_file")]
    pub delta: String,
    #[serde(default = "default_patched_output_file")]
    pub patched_output: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PatchConfig {
    #[serde(default)]
    pub mode: PatchMode,
}

/// Logging configuration.
///
/// Controls log verbosity globally and per module. `RUST_LOG` takes precedence.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `modelconf::index = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_input_dir() -> PathBuf {
    PathBuf::from("input")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}
fn default_root_class() -> String {
    "BTS".to_string()
}
fn default_indent() -> usize {
    4
}
fn default_true() -> bool {
    true
}
fn default_model_file() -> String {
    "impulse_test_input.xml".to_string()
}
fn default_config_xml_file() -> String {
    "config.xml".to_string()
}
fn default_metadata_file() -> String {
    "meta.json".to_string()
}
fn default_base_config_file() -> String {
    "config.json".to_string()
}
fn default_patched_config_file() -> String {
    "patched_config.json".to_string()
}
fn default_delta_file() -> String {
    "delta.json".to_string()
}
fn default_patched_output_file() -> String {
    "res_patched_config.json".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            model: ModelConfig::default(),
            files: FilesConfig::default(),
            patch: PatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            root_class: default_root_class(),
            cardinality: CardinalityPolicy::default(),
            indent: default_indent(),
            xml_declaration: true,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            model: default_model_file(),
            config_xml: default_config_xml_file(),
            metadata: default_metadata_file(),
            base_config: default_base_config_file(),
            patched_config: default_patched_config_file(),
            delta: default_delta_file(),
            patched_output: default_patched_output_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl ModelConfig {
    pub fn xml_options(&self) -> XmlOptions {
        XmlOptions {
            indent: self.indent,
            declaration: self.xml_declaration,
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still layering env vars on top
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore (__) separates nested levels,
            // single underscore stays part of the field name
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for the config directory
    /// from the current directory up to the filesystem root
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

    /// Create a default settings file in the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }

    pub fn input_path(&self, file: &str) -> PathBuf {
        self.input_dir.join(file)
    }

    pub fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}
