//! Loading papers for a date or a date range.

use chrono::NaiveDate;
use paperfeed_config::SourceSettings;
use tracing::{info, warn};

use crate::{
    CategoryMap, DataSource, DateLanguageIndex, Language, LoadError, ParseReport,
    language::{fallback_order, select_language},
    record::parse_data_file,
};

/// One date that contributed papers to a [`Feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedDay {
    /// The date.
    pub date: NaiveDate,
    /// Language of the file that was read.
    pub language: Language,
    /// Papers accepted from the file.
    pub papers: usize,
}

/// Papers loaded for a date or range, with what went into them.
#[derive(Debug, Default)]
pub struct Feed {
    /// Papers by primary category.
    pub papers: CategoryMap,
    /// Per-line parse outcomes, summed over all files.
    pub report: ParseReport,
    /// Dates read, oldest first.
    pub days: Vec<LoadedDay>,
    /// Dates in a range whose file was missing.
    pub skipped: Vec<NaiveDate>,
}

/// Reads the file index and data files from a [`DataSource`].
pub struct Loader {
    /// Where files come from.
    source: Box<dyn DataSource>,
    /// Path of the file index.
    index_path: String,
    /// Directory of the data files.
    data_dir: String,
    /// Language detected from the locale.
    detected: Language,
}

impl Loader {
    /// Creates a loader over `source` using the configured paths.
    pub fn new(source: Box<dyn DataSource>, settings: &SourceSettings, detected: Language) -> Self {
        Self {
            source,
            index_path: settings.index_path.clone(),
            data_dir: settings.data_dir.trim_end_matches('/').to_string(),
            detected,
        }
    }

    /// Description of the underlying source.
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Fetches and parses the file index. A missing index is an empty one.
    pub async fn load_index(&self) -> Result<DateLanguageIndex, LoadError> {
        match self.source.fetch(&self.index_path).await? {
            Some(text) => Ok(DateLanguageIndex::parse(&text)),
            None => {
                warn!(path = %self.index_path, "file index not found");
                Ok(DateLanguageIndex::default())
            }
        }
    }

    /// Available dates, most recent first.
    pub async fn list_available_dates(&self) -> Result<Vec<NaiveDate>, LoadError> {
        Ok(self.load_index().await?.dates())
    }

    /// Loads one date.
    ///
    /// Fails with [`LoadError::NotFound`] when no file exists for the date in any language.
    pub async fn load_papers_for_date(
        &self,
        index: &DateLanguageIndex,
        date: NaiveDate,
        language: Option<Language>,
    ) -> Result<Feed, LoadError> {
        let (day, papers, report) = self
            .load_day(index, date, language)
            .await?
            .ok_or(LoadError::NotFound { date })?;
        Ok(Feed {
            papers,
            report,
            days: vec![day],
            skipped: Vec::new(),
        })
    }

    /// Loads every indexed date in `[start, end]`, oldest first, merging categories.
    ///
    /// Dates whose file turns out to be missing are skipped with a warning.
    pub async fn load_papers_for_range(
        &self,
        index: &DateLanguageIndex,
        start: NaiveDate,
        end: NaiveDate,
        language: Option<Language>,
    ) -> Result<Feed, LoadError> {
        if start > end {
            return Err(LoadError::InvalidDate { start, end });
        }
        let dates = index.dates_between(start, end);
        if dates.is_empty() {
            return Err(LoadError::EmptyRange { start, end });
        }

        let mut feed = Feed::default();
        for date in dates {
            match self.load_day(index, date, language).await? {
                Some((day, papers, report)) => {
                    feed.papers.merge(papers);
                    feed.report.absorb(report);
                    feed.days.push(day);
                }
                None => {
                    warn!(%date, "indexed date has no data file, skipping");
                    feed.skipped.push(date);
                }
            }
        }
        info!(
            papers = feed.papers.len(),
            days = feed.days.len(),
            "loaded range {start}..={end}"
        );
        Ok(feed)
    }

    /// Reads the file for one date. `None` when no candidate language has a file.
    async fn load_day(
        &self,
        index: &DateLanguageIndex,
        date: NaiveDate,
        language: Option<Language>,
    ) -> Result<Option<(LoadedDay, CategoryMap, ParseReport)>, LoadError> {
        let listed = index.languages(date);
        let candidates = if listed.is_empty() {
            fallback_order(language, self.detected)
        } else {
            select_language(listed, language, self.detected)
                .into_iter()
                .collect()
        };

        for lang in candidates {
            let path = self.data_path(date, lang);
            let Some(text) = self.source.fetch(&path).await? else {
                continue;
            };
            let (papers, report) = parse_data_file(&text, date);
            info!(%date, language = %lang, papers = report.accepted, "loaded data file");
            let day = LoadedDay {
                date,
                language: lang,
                papers: report.accepted,
            };
            return Ok(Some((day, papers, report)));
        }
        Ok(None)
    }

    /// Relative path of the data file for a date and language.
    pub fn data_path(&self, date: NaiveDate, language: Language) -> String {
        let file = format!("{}_AI_enhanced_{}.jsonl", date.format("%Y-%m-%d"), language);
        if self.data_dir.is_empty() {
            file
        } else {
            format!("{}/{file}", self.data_dir)
        }
    }
}
