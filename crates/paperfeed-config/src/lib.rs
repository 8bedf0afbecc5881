//! Configuration system for paperfeed.
//!
//! paperfeed uses TOML configuration files named `.paperfeed.toml`. Configuration is resolved
//! by walking up the directory tree from the current working directory, collecting any
//! `.paperfeed.toml` files found, then loading `~/.paperfeed.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDisplaySettings, RawPreferenceSettings, RawSourceSettings, RawStatsSettings,
    parse_config_file, parse_config_str,
};
pub use resolve::{SourceLocation, resolve_source_base};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};

/// Default number of phrases shown in the keyword cloud.
pub const DEFAULT_CLOUD_SIZE: usize = 30;
/// Default number of cloud phrases that get a trend series.
pub const DEFAULT_TREND_SIZE: usize = 10;
/// Default number of phrases each title contributes to the statistics.
pub const DEFAULT_KEYWORDS_PER_TITLE: usize = 10;
/// Default minimum global count for a phrase to be reported.
pub const DEFAULT_MIN_COUNT: usize = 2;
/// Default maximum number of words in an extracted phrase.
pub const DEFAULT_MAX_PHRASE_WORDS: usize = 3;
/// Default location of the file index, relative to the source base.
pub const DEFAULT_INDEX_PATH: &str = "assets/file-list.txt";
/// Default directory holding the JSONL data files, relative to the source base.
pub const DEFAULT_DATA_DIR: &str = "data";
/// File name of the preference store inside the platform data directory.
pub const PREFERENCES_FILENAME: &str = "preferences.json";

/// Top-level merged configuration for paperfeed.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.paperfeed.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the file index and data files are fetched from.
    pub source: SourceSettings,
    /// Language and locale preferences.
    pub display: DisplaySettings,
    /// Keyword statistics settings.
    pub stats: StatsSettings,
    /// Preference store settings.
    pub preferences: PreferenceSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.paperfeed.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Returns the path of the preference store.
    ///
    /// Uses the configured path when present, otherwise `preferences.json` in the platform
    /// data directory.
    pub fn preferences_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.preferences.path {
            return Ok(path.clone());
        }
        ProjectDirs::from("", "", "paperfeed")
            .map(|dirs| dirs.data_dir().join(PREFERENCES_FILENAME))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            source: &self.source,
            display: &self.display,
            stats: &self.stats,
            preferences: &self.preferences,
        };
        toml::to_string_pretty(&serializable).unwrap_or_default()
    }
}

/// Location of the published feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Base URL or directory that the index and data paths are relative to.
    pub base: String,
    /// Path of the newline-delimited file index.
    pub index_path: String,
    /// Directory holding `<date>_AI_enhanced_<Language>.jsonl` files.
    pub data_dir: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base: String::from("."),
            index_path: String::from(DEFAULT_INDEX_PATH),
            data_dir: String::from(DEFAULT_DATA_DIR),
        }
    }
}

impl SourceSettings {
    /// Classifies the base as a remote URL or a local directory.
    pub fn location(&self) -> SourceLocation {
        SourceLocation::parse(&self.base)
    }
}

/// Language preferences.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Preferred data language (for example `English` or `Chinese`).
    pub language: Option<String>,
    /// Locale used instead of the environment when detecting a language.
    pub locale: Option<String>,
}

/// How titles are assigned to dates when counting trends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateAttribution {
    /// Each title counts toward its own paper's date.
    #[default]
    Exact,
    /// Titles are sliced across dates by their position in the flattened list.
    Proportional,
}

/// Keyword statistics settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsSettings {
    /// Number of phrases in the keyword cloud.
    pub cloud_size: usize,
    /// Number of cloud phrases with a trend series.
    pub trend_size: usize,
    /// Phrases each title contributes.
    pub keywords_per_title: usize,
    /// Minimum global count for a reported phrase.
    pub min_count: usize,
    /// Maximum words per extracted phrase.
    pub max_phrase_words: usize,
    /// Date attribution mode for trend counts.
    pub date_attribution: DateAttribution,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            cloud_size: DEFAULT_CLOUD_SIZE,
            trend_size: DEFAULT_TREND_SIZE,
            keywords_per_title: DEFAULT_KEYWORDS_PER_TITLE,
            min_count: DEFAULT_MIN_COUNT,
            max_phrase_words: DEFAULT_MAX_PHRASE_WORDS,
            date_attribution: DateAttribution::default(),
        }
    }
}

/// Preference store settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PreferenceSettings {
    /// Explicit preference file location.
    pub path: Option<PathBuf>,
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Source settings.
    source: &'a SourceSettings,
    /// Display settings.
    display: &'a DisplaySettings,
    /// Statistics settings.
    stats: &'a StatsSettings,
    /// Preference settings.
    preferences: &'a PreferenceSettings,
}
