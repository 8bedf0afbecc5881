//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, DisplaySettings, PreferenceSettings, SourceSettings, StatsSettings,
    parse::{
        RawConfig, RawDisplaySettings, RawPreferenceSettings, RawSourceSettings, RawStatsSettings,
    },
    resolve::{resolve_local_path, resolve_source_base},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Source base and preference paths resolve against the file that declared them
/// - The merged statistics settings are validated once all files are applied
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let source = merge_source_settings(configs)?;
    let display = merge_display_settings(configs);
    let stats = merge_stats_settings(configs)?;
    let preferences = merge_preference_settings(configs)?;
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        source,
        display,
        stats,
        preferences,
        config_root,
    })
}

/// Merges source settings, resolving the base against its declaring file.
fn merge_source_settings(configs: &[ParsedConfig]) -> Result<SourceSettings, ConfigError> {
    let mut result = SourceSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref source) = parsed.config.source {
            apply_raw_source(&mut result, source, parsed)?;
        }
    }

    Ok(result)
}

/// Applies raw source settings to result.
fn apply_raw_source(
    result: &mut SourceSettings,
    raw: &RawSourceSettings,
    parsed: &ParsedConfig,
) -> Result<(), ConfigError> {
    if let Some(ref base) = raw.base {
        if base.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                path: parsed.path.clone(),
                key: "source.base",
                message: "must not be empty".into(),
            });
        }
        result.base = resolve_source_base(base, parsed.dir())?;
    }
    if let Some(ref v) = raw.index_path {
        result.index_path = v.clone();
    }
    if let Some(ref v) = raw.data_dir {
        result.data_dir = v.clone();
    }
    Ok(())
}

/// Merges display settings.
fn merge_display_settings(configs: &[ParsedConfig]) -> DisplaySettings {
    let mut result = DisplaySettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref display) = parsed.config.display {
            apply_raw_display(&mut result, display);
        }
    }

    result
}

/// Applies raw display settings to result.
fn apply_raw_display(result: &mut DisplaySettings, raw: &RawDisplaySettings) {
    if let Some(ref v) = raw.language {
        result.language = Some(v.clone());
    }
    if let Some(ref v) = raw.locale {
        result.locale = Some(v.clone());
    }
}

/// Merges and validates statistics settings.
fn merge_stats_settings(configs: &[ParsedConfig]) -> Result<StatsSettings, ConfigError> {
    let mut result = StatsSettings::default();
    // The file that last set a value, for error reporting.
    let mut origin: Option<&Path> = None;

    for parsed in configs.iter().rev() {
        if let Some(ref stats) = parsed.config.stats {
            apply_raw_stats(&mut result, stats);
            origin = Some(&parsed.path);
        }
    }

    if let Some(path) = origin {
        validate_stats(&result, path)?;
    }
    Ok(result)
}

/// Applies raw statistics settings to result.
fn apply_raw_stats(result: &mut StatsSettings, raw: &RawStatsSettings) {
    if let Some(v) = raw.cloud_size {
        result.cloud_size = v;
    }
    if let Some(v) = raw.trend_size {
        result.trend_size = v;
    }
    if let Some(v) = raw.keywords_per_title {
        result.keywords_per_title = v;
    }
    if let Some(v) = raw.min_count {
        result.min_count = v;
    }
    if let Some(v) = raw.max_phrase_words {
        result.max_phrase_words = v;
    }
    if let Some(v) = raw.date_attribution {
        result.date_attribution = v;
    }
}

/// Rejects statistics settings that cannot produce a cloud.
fn validate_stats(stats: &StatsSettings, path: &Path) -> Result<(), ConfigError> {
    let invalid = |key: &'static str, message: &str| ConfigError::InvalidSetting {
        path: path.to_path_buf(),
        key,
        message: message.to_string(),
    };

    if stats.cloud_size == 0 {
        return Err(invalid("stats.cloud_size", "must be at least 1"));
    }
    if stats.trend_size > stats.cloud_size {
        return Err(invalid("stats.trend_size", "must not exceed stats.cloud_size"));
    }
    if stats.keywords_per_title == 0 {
        return Err(invalid("stats.keywords_per_title", "must be at least 1"));
    }
    if stats.max_phrase_words == 0 {
        return Err(invalid("stats.max_phrase_words", "must be at least 1"));
    }
    Ok(())
}

/// Merges preference settings, resolving the path against its declaring file.
fn merge_preference_settings(
    configs: &[ParsedConfig],
) -> Result<PreferenceSettings, ConfigError> {
    let mut result = PreferenceSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(RawPreferenceSettings { path: Some(path) }) = &parsed.config.preferences {
            result.path = Some(resolve_local_path(path, parsed.dir())?);
        }
    }

    Ok(result)
}
