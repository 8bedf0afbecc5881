//! Aggregation of per-title keywords into cloud and trend data.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet, HashMap},
};

use chrono::NaiveDate;
use paperfeed_config::{DateAttribution, StatsSettings};
use paperfeed_feed::CategoryMap;
use serde::Serialize;
use tracing::debug;

use crate::{DateAxis, KeywordExtractor};

/// Smallest cloud display size.
const MIN_DISPLAY_SIZE: usize = 12;
/// Largest cloud display size.
const MAX_DISPLAY_SIZE: usize = 50;

/// A title with the date and primary category of the paper it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    /// Paper date.
    pub date: NaiveDate,
    /// Primary category.
    pub category: String,
    /// Paper title.
    pub title: String,
}

/// Titles of a collection, in category order.
pub fn titles_from(papers: &CategoryMap) -> Vec<TitleEntry> {
    papers
        .all()
        .iter()
        .map(|paper| TitleEntry {
            date: paper.date,
            category: paper.primary_category().to_string(),
            title: paper.title.clone(),
        })
        .collect()
}

/// Counts for one phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordStat {
    /// The phrase.
    pub term: String,
    /// Number of titles it was a top keyword of.
    pub frequency: usize,
    /// Frequency per attributed date.
    pub per_date: BTreeMap<NaiveDate, usize>,
}

/// One entry of the keyword cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudEntry {
    /// The phrase.
    pub term: String,
    /// Global count.
    pub count: usize,
    /// Display size.
    pub size: usize,
}

/// A count on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// The date.
    pub date: NaiveDate,
    /// Count attributed to it.
    pub count: usize,
}

/// Counts of one phrase across every date, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    /// The phrase.
    pub term: String,
    /// One point per date, zero-filled.
    pub points: Vec<TrendPoint>,
}

/// Everything the statistics view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordReport {
    /// Dates covered, ascending.
    pub dates: Vec<NaiveDate>,
    /// Titles analyzed.
    pub titles: usize,
    /// Every phrase that reached the minimum count, best first.
    pub keywords: Vec<KeywordStat>,
    /// Top phrases with display sizes.
    pub cloud: Vec<CloudEntry>,
    /// Series for the leading cloud phrases.
    pub trends: Vec<TrendSeries>,
    /// Axis labels for the trend chart.
    pub axis: DateAxis,
}

impl KeywordReport {
    /// Looks up a phrase's counts.
    pub fn keyword(&self, term: &str) -> Option<&KeywordStat> {
        self.keywords.iter().find(|k| k.term == term)
    }
}

/// Cloud display size for a count.
pub fn display_size(count: usize) -> usize {
    count.saturating_mul(3).clamp(MIN_DISPLAY_SIZE, MAX_DISPLAY_SIZE)
}

/// Date for title `index` of `total` when titles are sliced evenly across `dates`.
pub fn proportional_date(index: usize, total: usize, dates: &[NaiveDate]) -> Option<NaiveDate> {
    let last = dates.len().checked_sub(1)?;
    if total == 0 {
        return None;
    }
    let per_date = total as f64 / dates.len() as f64;
    let slot = (index as f64 / per_date).floor() as usize;
    dates.get(slot.min(last)).copied()
}

/// Orders titles for proportional slicing: by category in first-seen order, newest date
/// first within a category.
fn slicing_order(entries: &[TitleEntry]) -> Vec<&TitleEntry> {
    let mut categories: Vec<&str> = Vec::new();
    for entry in entries {
        if !categories.contains(&entry.category.as_str()) {
            categories.push(&entry.category);
        }
    }
    let mut ordered: Vec<&TitleEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| {
        let rank = categories.iter().position(|c| *c == entry.category);
        (rank, Reverse(entry.date))
    });
    ordered
}

/// Computes keyword statistics over titles.
#[derive(Clone)]
pub struct StatsEngine {
    /// Per-title keyword extraction.
    extractor: KeywordExtractor,
    /// Sizes, thresholds and date attribution.
    settings: StatsSettings,
}

impl StatsEngine {
    /// Creates an engine with the default extractor.
    pub fn new(settings: &StatsSettings) -> Self {
        Self::with_extractor(KeywordExtractor::new(settings), settings)
    }

    /// Creates an engine with a specific extractor.
    pub fn with_extractor(extractor: KeywordExtractor, settings: &StatsSettings) -> Self {
        Self {
            extractor,
            settings: settings.clone(),
        }
    }

    /// Aggregates the keywords of `entries` over `dates`.
    ///
    /// With no dates given, the dates of the entries are used.
    pub fn compute(&self, entries: &[TitleEntry], dates: &[NaiveDate]) -> KeywordReport {
        let dates: Vec<NaiveDate> = if dates.is_empty() {
            entries.iter().map(|e| e.date).collect::<BTreeSet<_>>()
        } else {
            dates.iter().copied().collect::<BTreeSet<_>>()
        }
        .into_iter()
        .collect();

        // Proportional slices run newest date first over titles grouped by category.
        let (ordered, slices): (Vec<&TitleEntry>, Vec<NaiveDate>) =
            match self.settings.date_attribution {
                DateAttribution::Exact => (entries.iter().collect(), Vec::new()),
                DateAttribution::Proportional => {
                    (slicing_order(entries), dates.iter().rev().copied().collect())
                }
            };

        let mut counts: HashMap<String, KeywordStat> = HashMap::new();
        for (index, entry) in ordered.iter().enumerate() {
            let date = match self.settings.date_attribution {
                DateAttribution::Exact => Some(entry.date),
                DateAttribution::Proportional => proportional_date(index, ordered.len(), &slices),
            };
            for term in self.extractor.extract(&entry.title) {
                let stat = counts.entry(term.clone()).or_insert_with(|| KeywordStat {
                    term,
                    frequency: 0,
                    per_date: BTreeMap::new(),
                });
                stat.frequency += 1;
                if let Some(date) = date {
                    *stat.per_date.entry(date).or_default() += 1;
                }
            }
        }

        let extracted = counts.len();
        let mut keywords: Vec<KeywordStat> = counts
            .into_values()
            .filter(|stat| stat.frequency >= self.settings.min_count)
            .collect();
        keywords.sort_by(|a, b| {
            (Reverse(a.frequency), &a.term).cmp(&(Reverse(b.frequency), &b.term))
        });
        debug!(
            titles = entries.len(),
            extracted,
            kept = keywords.len(),
            "computed keyword statistics"
        );

        let cloud: Vec<CloudEntry> = keywords
            .iter()
            .take(self.settings.cloud_size)
            .map(|stat| CloudEntry {
                term: stat.term.clone(),
                count: stat.frequency,
                size: display_size(stat.frequency),
            })
            .collect();
        let trends = keywords
            .iter()
            .take(self.settings.cloud_size.min(self.settings.trend_size))
            .map(|stat| TrendSeries {
                term: stat.term.clone(),
                points: dates
                    .iter()
                    .map(|date| TrendPoint {
                        date: *date,
                        count: stat.per_date.get(date).copied().unwrap_or(0),
                    })
                    .collect(),
            })
            .collect();

        KeywordReport {
            axis: DateAxis::new(&dates),
            dates,
            titles: entries.len(),
            keywords,
            cloud,
            trends,
        }
    }
}
