//! The published file index: which dates exist, in which languages.

use std::{collections::BTreeMap, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;

use crate::Language;

/// Matches `<date>_AI_enhanced_<Language>.jsonl` anywhere in an index line.
static DATA_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})_AI_enhanced_([A-Za-z]+)\.jsonl")
        .expect("valid data file regex")
});

/// Available dates and the languages published for each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateLanguageIndex {
    /// Date to languages, in the order the index lists them.
    dates: BTreeMap<NaiveDate, Vec<Language>>,
}

impl DateLanguageIndex {
    /// Parses newline-delimited file names.
    ///
    /// Lines that do not name a data file, carry an impossible date, or use an unknown
    /// language are ignored.
    pub fn parse(text: &str) -> Self {
        let mut dates: BTreeMap<NaiveDate, Vec<Language>> = BTreeMap::new();
        for line in text.lines() {
            let Some(caps) = DATA_FILE.captures(line) else {
                continue;
            };
            let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") else {
                continue;
            };
            let Ok(language) = caps[2].parse::<Language>() else {
                continue;
            };
            // Only exact file-name spellings count.
            if language.name() != &caps[2] {
                continue;
            }
            let languages = dates.entry(date).or_default();
            if !languages.contains(&language) {
                languages.push(language);
            }
        }
        Self { dates }
    }

    /// Dates, most recent first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.dates.keys().rev().copied().collect()
    }

    /// Dates within `[start, end]`, oldest first.
    pub fn dates_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if start > end {
            return Vec::new();
        }
        self.dates.range(start..=end).map(|(date, _)| *date).collect()
    }

    /// Languages listed for a date; empty when the date is not indexed.
    pub fn languages(&self, date: NaiveDate) -> &[Language] {
        self.dates.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Most recent indexed date.
    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.keys().next_back().copied()
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
