//! Splitting text into highlighted and plain segments.

use std::{cmp::Reverse, ops::Range};

use regex::RegexBuilder;

/// What a highlighted segment marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// A keyword or text query hit in titles and summaries.
    Keyword,
    /// An author filter or text query hit in author names.
    Author,
}

impl HighlightKind {
    /// CSS class used by the HTML renderer.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Keyword => "keyword-highlight",
            Self::Author => "author-highlight",
        }
    }
}

/// A run of text, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The text, exactly as in the source.
    pub text: String,
    /// Whether this run matched a term.
    pub highlighted: bool,
}

/// Text split into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    /// What the highlighted runs mark.
    pub kind: HighlightKind,
    /// Segments in order; concatenated they equal the source text.
    pub segments: Vec<Segment>,
}

impl Highlighted {
    /// Highlights every case-insensitive occurrence of `terms` in `text`.
    ///
    /// Longer terms claim text first; a shorter term never highlights text that overlaps
    /// an already claimed match.
    pub fn new(text: &str, terms: &[String], kind: HighlightKind) -> Self {
        let ranges = match_ranges(text, terms);
        let mut segments = Vec::with_capacity(ranges.len() * 2 + 1);
        let mut pos = 0;
        for range in ranges {
            if range.start > pos {
                segments.push(Segment {
                    text: text[pos..range.start].to_string(),
                    highlighted: false,
                });
            }
            segments.push(Segment {
                text: text[range.clone()].to_string(),
                highlighted: true,
            });
            pos = range.end;
        }
        if pos < text.len() {
            segments.push(Segment {
                text: text[pos..].to_string(),
                highlighted: false,
            });
        }
        Self { kind, segments }
    }

    /// Unhighlighted text.
    pub fn plain(text: &str, kind: HighlightKind) -> Self {
        Self::new(text, &[], kind)
    }

    /// The source text.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Highlighted runs only.
    pub fn highlights(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
    }

    /// True when the text is empty.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }
}

/// Byte ranges of `text` claimed by `terms`, sorted. Touching matches stay separate.
pub fn match_ranges(text: &str, terms: &[String]) -> Vec<Range<usize>> {
    let mut ordered: Vec<&str> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    ordered.sort_by_key(|t| Reverse(t.chars().count()));
    ordered.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

    let mut claimed: Vec<Range<usize>> = Vec::new();
    for term in ordered {
        let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };
        for found in pattern.find_iter(text) {
            let range = found.range();
            if !claimed.iter().any(|c| overlaps(c, &range)) {
                claimed.push(range);
            }
        }
    }
    merge_ranges(claimed)
}

/// True when two ranges share at least one byte.
fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Sorts ranges and merges overlapping ones.
fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    if ranges.is_empty() {
        return ranges;
    }
    ranges.sort_by_key(|r| r.start);

    let mut merged = Vec::with_capacity(ranges.len());
    let mut current = ranges[0].clone();
    for range in ranges.into_iter().skip(1) {
        if range.start < current.end {
            current.end = current.end.max(range.end);
        } else {
            merged.push(current);
            current = range;
        }
    }
    merged.push(current);
    merged
}
