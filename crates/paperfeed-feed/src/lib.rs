//! Loading of the daily paper feed.
//!
//! The feed is a static site: a newline-delimited file index listing
//! `<date>_AI_enhanced_<Language>.jsonl` data files, one JSON record per paper. This crate
//! fetches those files from a [`DataSource`], chooses a language per date, parses records
//! into shared [`Paper`]s and groups them by primary category.

#![warn(missing_docs)]

mod error;
mod index;
mod language;
mod loader;
mod model;
mod record;
mod source;

pub use error::{LoadError, ParseError, SourceError};
pub use index::DateLanguageIndex;
pub use language::{Language, UnknownLanguage, fallback_order, select_language};
pub use loader::{Feed, LoadedDay, Loader};
pub use model::{CategoryMap, CategorySummary, Paper};
pub use record::{ParseReport, parse_data_file};
pub use source::{DataSource, DirSource, HttpSource, source_for};
