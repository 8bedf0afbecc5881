//! Keyword statistics for paperfeed.
//!
//! Titles are reduced to a handful of keyword phrases each by a lightweight tagger, then
//! counted globally and per date. The result feeds a keyword cloud and trend series for the
//! most frequent phrases.

#![warn(missing_docs)]

mod aggregate;
mod axis;
mod extract;
mod stopwords;
mod tagger;

pub use aggregate::{
    CloudEntry, KeywordReport, KeywordStat, StatsEngine, TitleEntry, TrendPoint, TrendSeries,
    display_size, proportional_date, titles_from,
};
pub use axis::DateAxis;
pub use extract::{
    KeywordExtractor, ScoredPhrase, candidate_phrases, clean_title, keep_phrase, score_phrases,
};
pub use stopwords::{FunctionWords, is_filler};
pub use tagger::{Tag, Tagger};
