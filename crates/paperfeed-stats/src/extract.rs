//! Phrase extraction from a single title.
//!
//! A title is cleaned, tagged, and split into candidate phrases: maximal noun runs and
//! adjective runs followed by a noun run. Candidates are filtered, weighted, and the best
//! few are kept.

use std::cmp::Ordering;

use paperfeed_config::StatsSettings;

use crate::{Tag, Tagger, is_filler};

/// Weight multiplier for phrases of more than one word.
const MULTI_WORD_WEIGHT: f64 = 1.5;

/// Words of this length or shorter disqualify a phrase.
const MAX_SHORT_WORD_LEN: usize = 2;

/// A phrase with its normalized term-frequency score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPhrase {
    /// Lower-cased phrase.
    pub phrase: String,
    /// Weight divided by the title's total weight.
    pub score: f64,
}

/// Replaces everything but word characters and whitespace with spaces.
pub fn clean_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Candidate phrases of at most `max_words` words, lower-cased and deduplicated.
///
/// Noun runs come first, then adjective phrases, each in title order.
pub fn candidate_phrases(title: &str, tagger: &Tagger, max_words: usize) -> Vec<String> {
    let cleaned = clean_title(title);
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let tagged = tagger.tag_all(&words);

    let mut nouns = Vec::new();
    let mut adjective_phrases = Vec::new();
    let mut i = 0;
    while i < tagged.len() {
        match tagged[i].1 {
            Tag::Break => i += 1,
            Tag::Noun => {
                let end = run_end(&tagged, i, Tag::Noun);
                nouns.push(&tagged[i..end]);
                i = end;
            }
            Tag::Adjective => {
                let adjectives_end = run_end(&tagged, i, Tag::Adjective);
                let end = run_end(&tagged, adjectives_end, Tag::Noun);
                if end > adjectives_end {
                    nouns.push(&tagged[adjectives_end..end]);
                    adjective_phrases.push(&tagged[i..end]);
                }
                i = end;
            }
        }
    }

    let mut phrases: Vec<String> = Vec::new();
    for run in nouns.into_iter().chain(adjective_phrases) {
        if run.len() > max_words {
            continue;
        }
        let phrase = run
            .iter()
            .map(|(word, _)| word.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        if !phrases.contains(&phrase) {
            phrases.push(phrase);
        }
    }
    phrases
}

/// Index just past the run of `tag` starting at `start`.
fn run_end(tagged: &[(&str, Tag)], start: usize, tag: Tag) -> usize {
    tagged[start..]
        .iter()
        .position(|(_, t)| *t != tag)
        .map_or(tagged.len(), |offset| start + offset)
}

/// True unless a word is too short or every word is filler.
pub fn keep_phrase(phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split(' ').collect();
    words
        .iter()
        .all(|w| w.chars().count() > MAX_SHORT_WORD_LEN)
        && !words.iter().all(|w| is_filler(w))
}

/// Scores phrases by weight over the total, best first. Ties keep input order.
pub fn score_phrases(phrases: &[String]) -> Vec<ScoredPhrase> {
    let weight = |p: &str| {
        if p.contains(' ') {
            MULTI_WORD_WEIGHT
        } else {
            1.0
        }
    };
    let total: f64 = phrases.iter().map(|p| weight(p)).sum();
    let mut scored: Vec<ScoredPhrase> = phrases
        .iter()
        .map(|p| ScoredPhrase {
            phrase: p.clone(),
            score: weight(p) / total,
        })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}

/// Extracts the keywords a title contributes to the statistics.
#[derive(Clone)]
pub struct KeywordExtractor {
    /// Word tagger.
    tagger: Tagger,
    /// Longest phrase kept.
    max_phrase_words: usize,
    /// Phrases kept per title.
    keywords_per_title: usize,
}

impl KeywordExtractor {
    /// Creates an extractor from statistics settings with the default tagger.
    pub fn new(settings: &StatsSettings) -> Self {
        Self::with_tagger(Tagger::default(), settings)
    }

    /// Creates an extractor with a specific tagger.
    pub fn with_tagger(tagger: Tagger, settings: &StatsSettings) -> Self {
        Self {
            tagger,
            max_phrase_words: settings.max_phrase_words,
            keywords_per_title: settings.keywords_per_title,
        }
    }

    /// Scored keywords of one title, best first.
    pub fn scored(&self, title: &str) -> Vec<ScoredPhrase> {
        let phrases: Vec<String> = candidate_phrases(title, &self.tagger, self.max_phrase_words)
            .into_iter()
            .filter(|p| keep_phrase(p))
            .collect();
        let mut scored = score_phrases(&phrases);
        scored.truncate(self.keywords_per_title);
        scored
    }

    /// Keywords of one title, best first.
    pub fn extract(&self, title: &str) -> Vec<String> {
        self.scored(title).into_iter().map(|s| s.phrase).collect()
    }
}
