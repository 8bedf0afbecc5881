//! Configuration file parsing.
//!
//! Parses individual `.paperfeed.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use toml::de::Error as TomlError;

use crate::{ConfigError, DateAttribution};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Feed source section.
    pub source: Option<RawSourceSettings>,
    /// Display section.
    pub display: Option<RawDisplaySettings>,
    /// Statistics section.
    pub stats: Option<RawStatsSettings>,
    /// Preference store section.
    pub preferences: Option<RawPreferenceSettings>,
}

/// Raw feed source settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSourceSettings {
    /// Base URL or directory.
    pub base: Option<String>,
    /// File index path relative to the base.
    pub index_path: Option<String>,
    /// Data directory relative to the base.
    pub data_dir: Option<String>,
}

/// Raw display settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDisplaySettings {
    /// Preferred data language.
    pub language: Option<String>,
    /// Locale override.
    pub locale: Option<String>,
}

/// Raw statistics settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStatsSettings {
    /// Keyword cloud size.
    pub cloud_size: Option<usize>,
    /// Trend series count.
    pub trend_size: Option<usize>,
    /// Phrases contributed per title.
    pub keywords_per_title: Option<usize>,
    /// Minimum reported count.
    pub min_count: Option<usize>,
    /// Maximum words per phrase.
    pub max_phrase_words: Option<usize>,
    /// Trend date attribution mode.
    pub date_attribution: Option<DateAttribution>,
}

/// Raw preference store settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPreferenceSettings {
    /// Preference file path (tilde and relative paths are resolved at merge time).
    pub path: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

/// Parses configuration from a TOML string without a source path.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}
