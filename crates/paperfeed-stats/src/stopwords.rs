//! Word lists used by phrase extraction.
//!
//! Two lists with different jobs:
//! - Function words (the `stop-words` English list plus common title verbs) split a title
//!   into phrase candidates.
//! - Filler words are generic research vocabulary. A phrase made only of filler is dropped.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// Verbs and connectives common in titles that the English list lacks.
static TITLE_VERBS: &[&str] = &[
    "using", "via", "towards", "toward", "versus", "vs", "improves", "improving", "enables",
    "enabling", "meets", "makes", "learns", "beyond", "without", "through", "revisiting",
    "rethinking", "leveraging", "boosting", "unlocking", "bridging", "scaling",
];

/// Generic terms that never make a useful keyword on their own.
static FILLER_WORDS: &[&str] = &[
    "the", "is", "at", "which", "and", "or", "in", "to", "for", "of", "with", "by", "on", "this",
    "that", "our", "method", "based", "towards", "via", "multi", "text", "using", "aware", "data",
    "from", "paper", "propose", "proposed", "approach", "model", "system", "framework", "results",
    "show", "demonstrates", "experimental", "experiments", "evaluation", "performance", "state",
    "art", "sota", "dataset", "datasets", "task", "tasks", "learning", "neural", "network",
    "networks", "deep", "machine", "artificial", "intelligence", "ai", "ml", "dl",
];

/// Function words that end a phrase.
#[derive(Clone)]
pub struct FunctionWords {
    /// Lower-cased words.
    words: HashSet<String>,
}

impl Default for FunctionWords {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionWords {
    /// English stopwords plus title verbs.
    pub fn new() -> Self {
        let mut words = Self::from_words(stop_words::get(LANGUAGE::English));
        words.extend(TITLE_VERBS);
        words
    }

    /// A list built from `words` only.
    pub fn from_words(words: &[&str]) -> Self {
        let mut list = Self {
            words: HashSet::new(),
        };
        list.extend(words);
        list
    }

    /// Adds words, lower-cased.
    fn extend(&mut self, words: &[&str]) {
        self.words.extend(words.iter().map(|w| w.to_ascii_lowercase()));
    }

    /// Case-insensitive membership.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_lowercase())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Whether a lower-cased word is generic research filler.
pub fn is_filler(word: &str) -> bool {
    FILLER_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_words_break_phrases() {
        let words = FunctionWords::new();
        for word in ["the", "and", "of", "for", "with", "Under"] {
            assert!(words.contains(word), "{word}");
        }
        assert!(words.contains("Via"));
    }

    #[test]
    fn content_words_are_not_function_words() {
        let words = FunctionWords::new();
        assert!(!words.contains("robust"));
        assert!(!words.contains("retrieval"));
    }

    #[test]
    fn from_words_is_exact() {
        let words = FunctionWords::from_words(&["of"]);
        assert_eq!(words.len(), 1);
        assert!(words.contains("OF"));
        assert!(!words.contains("the"));
    }

    #[test]
    fn filler() {
        assert!(is_filler("networks"));
        assert!(is_filler("sota"));
        assert!(!is_filler("robust"));
    }
}
