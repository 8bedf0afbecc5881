//! Render models for paper cards and detail views.

use chrono::NaiveDate;
use paperfeed_feed::Paper;
use paperfeed_rank::{FilterState, MatchReason, RankedPaper, Ranking};

use crate::{HighlightKind, Highlighted};

/// Authors shown in full up to this count; longer lists are elided.
const MAX_FULL_AUTHORS: usize = 4;

/// Instruction placed before the reading prompt in assistant links.
const ASSISTANT_INSTRUCTION: &str = "You are an academic assistant. The conversation will revolve around the content of the paper. Answer professionally in the third person and use Markdown.";

/// Chat assistant that receives the prompt link.
const ASSISTANT_URL: &str = "https://gemini.google.com/app?text=";

/// Terms to highlight, derived from a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightTerms {
    /// Highlighted in titles, summaries and detail sections.
    pub text: Vec<String>,
    /// Highlighted in author names.
    pub authors: Vec<String>,
}

impl HighlightTerms {
    /// Active keywords plus the query for text; active authors plus the query for authors.
    pub fn from_filter(filter: &FilterState) -> Self {
        let mut text = filter.active_keywords().to_vec();
        let mut authors = filter.active_authors().to_vec();
        if let Some(query) = filter.active_query() {
            text.push(query.to_string());
            authors.push(query.to_string());
        }
        Self { text, authors }
    }
}

/// One element of a card's author line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorItem {
    /// An author's name.
    Name(Highlighted),
    /// Stands in for elided middle authors.
    Ellipsis,
}

/// Builds a card author line.
///
/// Up to four authors are listed in full; longer lists show the first two, an
/// ellipsis, and the last two.
pub fn author_line(authors: &[String], terms: &[String]) -> Vec<AuthorItem> {
    let name = |a: &String| AuthorItem::Name(Highlighted::new(a, terms, HighlightKind::Author));
    if authors.len() <= MAX_FULL_AUTHORS {
        return authors.iter().map(name).collect();
    }
    let mut line: Vec<AuthorItem> = authors[..2].iter().map(name).collect();
    line.push(AuthorItem::Ellipsis);
    line.extend(authors[authors.len() - 2..].iter().map(name));
    line
}

/// A paper as shown in the feed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// 1-based position in the ranking.
    pub index: usize,
    /// Whether the paper matched the filter.
    pub matched: bool,
    /// What it matched on.
    pub reason: MatchReason,
    /// Highlighted title.
    pub title: Highlighted,
    /// Highlighted short summary.
    pub summary: Highlighted,
    /// Author line, possibly elided.
    pub authors: Vec<AuthorItem>,
    /// All categories, primary first.
    pub categories: Vec<String>,
    /// Paper date.
    pub date: NaiveDate,
    /// Abstract URL.
    pub url: String,
}

impl Card {
    /// Builds the card for the ranked paper at 0-based `position`.
    pub fn new(position: usize, ranked: &RankedPaper, terms: &HighlightTerms) -> Self {
        let paper = &ranked.paper;
        Self {
            index: position + 1,
            matched: ranked.matched,
            reason: ranked.reason.clone(),
            title: Highlighted::new(&paper.title, &terms.text, HighlightKind::Keyword),
            summary: Highlighted::new(&paper.summary, &terms.text, HighlightKind::Keyword),
            authors: author_line(&paper.authors, &terms.authors),
            categories: paper.categories.clone(),
            date: paper.date,
            url: paper.url.clone(),
        }
    }
}

/// Cards for a whole ranking.
pub fn cards(ranking: &Ranking, filter: &FilterState) -> Vec<Card> {
    let terms = HighlightTerms::from_filter(filter);
    ranking
        .papers()
        .iter()
        .enumerate()
        .map(|(i, ranked)| Card::new(i, ranked, &terms))
        .collect()
}

/// A labelled block of detail text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading such as `Motivation`.
    pub label: &'static str,
    /// Highlighted body.
    pub body: Highlighted,
}

/// Outbound links for a paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    /// Abstract page.
    pub abs: String,
    /// PDF.
    pub pdf: String,
    /// HTML rendering.
    pub html: String,
    /// Code repository.
    pub code: Option<String>,
    /// Repository stars.
    pub code_stars: Option<u64>,
    /// Chat assistant primed with a reading prompt.
    pub assistant: String,
}

/// Everything shown when one paper is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// 1-based position and list length, when opened from a list.
    pub position: Option<(usize, usize)>,
    /// Whether the paper matched the filter.
    pub matched: bool,
    /// Highlighted title.
    pub title: Highlighted,
    /// Highlighted full author list.
    pub authors: Highlighted,
    /// Categories joined with `", "`.
    pub categories: String,
    /// Paper date.
    pub date: NaiveDate,
    /// Highlighted TL;DR.
    pub tldr: Highlighted,
    /// Structured sections that are present, in fixed order.
    pub sections: Vec<Section>,
    /// Highlighted original abstract, when present.
    pub abstract_text: Option<Highlighted>,
    /// Outbound links.
    pub links: Links,
}

impl DetailView {
    /// Builds the detail view of a paper, each field highlighted independently.
    pub fn new(paper: &Paper, matched: bool, terms: &HighlightTerms) -> Self {
        let text = |s: &str| Highlighted::new(s, &terms.text, HighlightKind::Keyword);
        let sections = [
            ("Motivation", &paper.motivation),
            ("Method", &paper.method),
            ("Result", &paper.result),
            ("Conclusion", &paper.conclusion),
        ]
        .into_iter()
        .filter_map(|(label, body)| {
            body.as_deref().map(|body| Section {
                label,
                body: text(body),
            })
        })
        .collect();

        Self {
            position: None,
            matched,
            title: text(&paper.title),
            authors: Highlighted::new(
                &paper.joined_authors(),
                &terms.authors,
                HighlightKind::Author,
            ),
            categories: paper.categories.join(", "),
            date: paper.date,
            tldr: text(&paper.summary),
            sections,
            abstract_text: (!paper.long_abstract.trim().is_empty())
                .then(|| text(&paper.long_abstract)),
            links: Links {
                abs: paper.url.clone(),
                pdf: paper.pdf_url(),
                html: paper.html_url(),
                code: paper.code_url.clone(),
                code_stars: paper.code_stars,
                assistant: assistant_link(paper),
            },
        }
    }

    /// Records where in a list this paper sits.
    pub fn at(mut self, position: usize, total: usize) -> Self {
        self.position = Some((position, total));
        self
    }
}

/// Link that opens a chat assistant with a prompt to read and summarize the paper.
pub fn assistant_link(paper: &Paper) -> String {
    let prompt = format!(
        "{ASSISTANT_INSTRUCTION}\n\nRead this paper {}, summarize the problems solved, related work, research methods, experiments and results, conclusion, and finally summarize the content of this paper.",
        paper.pdf_url()
    );
    format!("{ASSISTANT_URL}{}", urlencoding::encode(&prompt))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn line_text(line: &[AuthorItem]) -> String {
        line.iter()
            .map(|item| match item {
                AuthorItem::Name(h) => h.text(),
                AuthorItem::Ellipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn paper() -> Paper {
        Paper {
            id: "2503.00001".into(),
            title: "Robust Deep Learning".into(),
            authors: names(&["Ada", "Grace"]),
            categories: names(&["cs.LG", "stat.ML"]),
            summary: "We study deep learning.".into(),
            long_abstract: "Long text about learning.".into(),
            motivation: Some("Learning is hard.".into()),
            method: None,
            result: Some("It works.".into()),
            conclusion: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            url: "https://arxiv.org/abs/2503.00001".into(),
            code_url: Some("https://github.com/x/y".into()),
            code_stars: Some(3),
            code_last_update: None,
        }
    }

    #[test]
    fn test_five_authors_elided() {
        let line = author_line(&names(&["A", "B", "C", "D", "E"]), &[]);
        assert_eq!(line_text(&line), "A, B, …, D, E");
    }

    #[test]
    fn test_four_authors_in_full() {
        let line = author_line(&names(&["A", "B", "C", "D"]), &[]);
        assert_eq!(line_text(&line), "A, B, C, D");
        assert!(!line.contains(&AuthorItem::Ellipsis));
    }

    #[test]
    fn test_terms_include_query() {
        let mut filter = FilterState::seeded(&names(&["llm"]), &names(&["Ada"]));
        assert_eq!(HighlightTerms::from_filter(&filter).text, ["llm"]);
        filter.set_query("robust");
        let terms = HighlightTerms::from_filter(&filter);
        assert_eq!(terms.text, ["robust"]);
        assert_eq!(terms.authors, ["robust"]);
    }

    #[test]
    fn test_card_highlights() {
        let ranked = RankedPaper {
            paper: Arc::new(paper()),
            matched: true,
            reason: MatchReason {
                keywords: names(&["deep learning"]),
                ..MatchReason::default()
            },
        };
        let terms = HighlightTerms {
            text: names(&["deep learning"]),
            authors: names(&["grace"]),
        };
        let card = Card::new(0, &ranked, &terms);
        assert_eq!(card.index, 1);
        assert_eq!(card.title.highlights().collect::<Vec<_>>(), ["Deep Learning"]);
        let AuthorItem::Name(second) = &card.authors[1] else {
            panic!("expected a name");
        };
        assert_eq!(second.highlights().collect::<Vec<_>>(), ["Grace"]);
    }

    #[test]
    fn test_detail_sections_and_links() {
        let terms = HighlightTerms {
            text: names(&["learning"]),
            authors: Vec::new(),
        };
        let detail = DetailView::new(&paper(), false, &terms).at(2, 9);
        assert_eq!(detail.position, Some((2, 9)));
        let labels: Vec<_> = detail.sections.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Motivation", "Result"]);
        assert_eq!(
            detail.sections[0].body.highlights().collect::<Vec<_>>(),
            ["Learning"]
        );
        assert_eq!(detail.links.pdf, "https://arxiv.org/pdf/2503.00001");
        assert_eq!(detail.links.html, "https://arxiv.org/html/2503.00001");
        assert!(detail.abstract_text.is_some());
    }

    #[test]
    fn test_assistant_link_is_encoded() {
        let link = assistant_link(&paper());
        assert!(link.starts_with(ASSISTANT_URL));
        assert!(link.contains("https%3A%2F%2Farxiv.org%2Fpdf%2F2503.00001"));
        assert!(!link[ASSISTANT_URL.len()..].contains(' '));
    }
}
