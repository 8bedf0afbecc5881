//! Where the file index and data files are fetched from.
//!
//! - [`HttpSource`]: a published site, fetched with `reqwest`
//! - [`DirSource`]: a local checkout of the same layout

use std::{
    io,
    path::PathBuf,
    time::Duration,
};

use async_trait::async_trait;
use paperfeed_config::{SourceLocation, SourceSettings};
use reqwest::StatusCode;
use tokio::fs;
use tracing::debug;

use crate::SourceError;

/// Fetches text files by path relative to a base.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches a file.
    ///
    /// Returns `Ok(None)` when the file does not exist and `Err` for any other failure.
    async fn fetch(&self, path: &str) -> Result<Option<String>, SourceError>;

    /// Human-readable base location, for messages.
    fn describe(&self) -> String;
}

/// Builds the source named by the configured base.
pub fn source_for(settings: &SourceSettings) -> Result<Box<dyn DataSource>, SourceError> {
    Ok(match settings.location() {
        SourceLocation::Url(url) => Box::new(HttpSource::new(url)?),
        SourceLocation::Dir(dir) => Box::new(DirSource::new(dir)),
    })
}

/// A site published over HTTP(S).
pub struct HttpSource {
    /// Shared client.
    client: reqwest::Client,
    /// Base URL with a trailing slash.
    base: String,
}

impl HttpSource {
    /// Creates a source rooted at `base`.
    pub fn new(base: impl Into<String>) -> Result<Self, SourceError> {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("paperfeed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SourceError::Http {
                url: base.clone(),
                source,
            })?;
        Ok(Self { client, base })
    }

    /// Full URL of a relative path.
    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Option<String>, SourceError> {
        let url = self.url_for(path);
        debug!(%url, "fetching");
        let http_err = |source| SourceError::Http {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(http_err)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status().map_err(http_err)?;
        let text = response.text().await.map_err(http_err)?;
        Ok(Some(text))
    }

    fn describe(&self) -> String {
        self.base.clone()
    }
}

/// A local directory with the published layout.
pub struct DirSource {
    /// Directory the relative paths are joined onto.
    root: PathBuf,
}

impl DirSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<Option<String>, SourceError> {
        let full = self.root.join(path.trim_start_matches('/'));
        debug!(path = %full.display(), "reading");
        match fs::read_to_string(&full).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::Io { path: full, source }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
