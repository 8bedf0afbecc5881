//! Resolution of source locations and local paths.
//!
//! A source base is either an `http(s)` URL or a directory. Relative directories and
//! tilde-prefixed paths are resolved against the config file that declared them.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Where the feed is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Remote base URL.
    Url(String),
    /// Local directory.
    Dir(PathBuf),
}

impl SourceLocation {
    /// Classifies a base string as a URL or a directory path.
    pub fn parse(base: &str) -> Self {
        if base.starts_with("http://") || base.starts_with("https://") {
            Self::Url(base.to_string())
        } else {
            Self::Dir(PathBuf::from(base))
        }
    }
}

/// Resolves a source base declared in a config file located in `config_dir`.
///
/// URLs are returned unchanged. Directory paths have `~` expanded and are joined onto
/// `config_dir` when relative. The directory is not required to exist yet.
pub fn resolve_source_base(base: &str, config_dir: &Path) -> Result<String, ConfigError> {
    match SourceLocation::parse(base) {
        SourceLocation::Url(url) => Ok(url),
        SourceLocation::Dir(_) => {
            let resolved = resolve_local_path(base, config_dir)?;
            Ok(resolved.to_string_lossy().into_owned())
        }
    }
}

/// Resolves a local path relative to `config_dir`, expanding a leading tilde.
pub fn resolve_local_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
