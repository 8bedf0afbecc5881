//! A small lexicon tagger for paper titles.

use crate::FunctionWords;

/// Suffixes that mark a word as an adjective.
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ical", "al", "ive", "ous", "ic", "able", "ible", "ful", "less", "ary",
];

/// Words shorter than this are never tagged by suffix.
const MIN_SUFFIX_WORD_LEN: usize = 5;

/// Part of speech as far as phrase extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Can head or extend a noun phrase.
    Noun,
    /// Can precede a noun run.
    Adjective,
    /// Ends any phrase.
    Break,
}

/// Tags title words using function words and suffix rules.
#[derive(Clone, Default)]
pub struct Tagger {
    /// Words that end phrases.
    function_words: FunctionWords,
}

impl Tagger {
    /// Creates a tagger over the given function words.
    pub fn new(function_words: FunctionWords) -> Self {
        Self { function_words }
    }

    /// Tags one word.
    pub fn tag(&self, word: &str) -> Tag {
        if !word.chars().any(char::is_alphabetic) || self.function_words.contains(word) {
            return Tag::Break;
        }
        let lower = word.to_lowercase();
        let adjective = lower.chars().count() >= MIN_SUFFIX_WORD_LEN
            && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s));
        if adjective { Tag::Adjective } else { Tag::Noun }
    }

    /// Tags every word of `words`.
    pub fn tag_all<'a>(&self, words: &[&'a str]) -> Vec<(&'a str, Tag)> {
        words.iter().map(|w| (*w, self.tag(w))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger() -> Tagger {
        Tagger::new(FunctionWords::from_words(&["for", "of", "the"]))
    }

    #[test]
    fn suffixes_mark_adjectives() {
        let tagger = tagger();
        assert_eq!(tagger.tag("Neural"), Tag::Adjective);
        assert_eq!(tagger.tag("generative"), Tag::Adjective);
        assert_eq!(tagger.tag("Scalable"), Tag::Adjective);
        assert_eq!(tagger.tag("dynamic"), Tag::Adjective);
    }

    #[test]
    fn short_words_are_nouns() {
        let tagger = tagger();
        assert_eq!(tagger.tag("goal"), Tag::Noun);
        assert_eq!(tagger.tag("graph"), Tag::Noun);
    }

    #[test]
    fn function_words_and_numbers_break() {
        let tagger = tagger();
        assert_eq!(tagger.tag("For"), Tag::Break);
        assert_eq!(tagger.tag("2025"), Tag::Break);
        assert_eq!(tagger.tag("GPT4"), Tag::Noun);
    }

    #[test]
    fn tag_all_keeps_order() {
        let tagged = tagger().tag_all(&["Robust", "Neural", "Networks"]);
        assert_eq!(
            tagged,
            vec![
                ("Robust", Tag::Noun),
                ("Neural", Tag::Adjective),
                ("Networks", Tag::Noun),
            ]
        );
    }
}
