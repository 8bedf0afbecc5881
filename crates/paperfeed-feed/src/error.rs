//! Error types for feed loading.

use std::{io, path::PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by a data source while fetching a file.
///
/// A missing file is not an error; sources report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading a local file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An HTTP request failed or returned an error status.
    #[error("request for {url} failed: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        source: reqwest::Error,
    },
}

/// Errors raised while loading papers.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No data file exists for the date in any language.
    #[error("no papers found for {date}")]
    NotFound {
        /// Requested date.
        date: NaiveDate,
    },

    /// The requested range selects no indexed dates.
    #[error("no data available between {start} and {end}")]
    EmptyRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// The range end precedes its start.
    #[error("invalid date range: {start} is after {end}")]
    InvalidDate {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// The data source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// A single data file line that could not be turned into a paper.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line is not valid JSON for a paper record.
    #[error("line {line}: {source}")]
    Json {
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The record has neither `abs`, `pdf` nor `id`.
    #[error("line {line}: record has no abs, pdf or id to link to")]
    MissingUrl {
        /// 1-based line number.
        line: usize,
    },
}

impl ParseError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::Json { line, .. } | Self::MissingUrl { line } => *line,
        }
    }
}
