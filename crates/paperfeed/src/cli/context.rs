//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use paperfeed_config::Config;
use paperfeed_feed::{Language, Loader, source_for};
use paperfeed_rank::{JsonFileStore, PreferenceStore};
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Language detected from the configured locale or the environment.
    pub fn detected_language(&self) -> Language {
        Language::detect(self.config.display.locale.as_deref())
    }

    /// The language to prefer: the flag, else the configured one.
    pub fn preferred_language(&self, flag: Option<Language>) -> Result<Option<Language>, ExitCode> {
        if flag.is_some() {
            return Ok(flag);
        }
        match &self.config.display.language {
            None => Ok(None),
            Some(name) => name.parse().map(Some).map_err(|e| {
                eprintln!("error: display.language: {e}");
                ExitCode::FAILURE
            }),
        }
    }

    /// Builds a loader for the configured source.
    pub fn loader(&self) -> Result<Loader, ExitCode> {
        let source = source_for(&self.config.source).map_err(|e| {
            eprintln!("error: failed to open source: {e}");
            ExitCode::FAILURE
        })?;
        let loader = Loader::new(source, &self.config.source, self.detected_language());
        debug!(source = %loader.describe(), "using source");
        Ok(loader)
    }

    /// Opens the preference store.
    ///
    /// An unreadable or malformed store opens empty.
    pub fn preferences(&self) -> Result<PreferenceStore<JsonFileStore>, ExitCode> {
        let path = self.config.preferences_path().map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        debug!(path = %path.display(), "opening preferences");
        Ok(PreferenceStore::load(JsonFileStore::open(path)))
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
