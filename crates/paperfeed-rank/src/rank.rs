//! Ranking papers against a [`FilterState`].
//!
//! Matching never removes papers: matched papers move to the front, and the order is
//! otherwise the category order of the loaded collection.

use std::sync::Arc;

use paperfeed_feed::{CategoryMap, Paper};
use serde::Serialize;

use crate::{Category, FilterState};

/// Why a paper matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReason {
    /// Active keywords found in the title or summary.
    pub keywords: Vec<String>,
    /// Active authors found in the author list.
    pub authors: Vec<String>,
    /// The text query, when it matched.
    pub query: Option<String>,
}

impl MatchReason {
    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.authors.is_empty() && self.query.is_none()
    }
}

/// A paper in ranked position.
#[derive(Debug, Clone)]
pub struct RankedPaper {
    /// The paper.
    pub paper: Arc<Paper>,
    /// Whether it satisfied the current filter.
    pub matched: bool,
    /// What it matched on.
    pub reason: MatchReason,
}

/// Result of ranking.
#[derive(Debug, Clone)]
pub enum Ranking {
    /// The category restriction left no papers.
    Empty,
    /// Papers in display order.
    Papers(Vec<RankedPaper>),
}

impl Ranking {
    /// Ranked papers; empty for [`Ranking::Empty`].
    pub fn papers(&self) -> &[RankedPaper] {
        match self {
            Self::Empty => &[],
            Self::Papers(papers) => papers,
        }
    }

    /// Number of ranked papers.
    pub fn len(&self) -> usize {
        self.papers().len()
    }

    /// True for [`Ranking::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of matched papers.
    pub fn matched(&self) -> usize {
        self.papers().iter().filter(|p| p.matched).count()
    }

    /// The shared papers in ranked order.
    pub fn snapshot(&self) -> Vec<Arc<Paper>> {
        self.papers().iter().map(|p| Arc::clone(&p.paper)).collect()
    }
}

/// Ranks the collection against the filter.
pub fn rank(papers: &CategoryMap, filter: &FilterState) -> Ranking {
    let candidates: Vec<Arc<Paper>> = match filter.category() {
        Category::All => papers.all(),
        Category::Named(name) => papers.get(name).map(<[_]>::to_vec).unwrap_or_default(),
    };
    if candidates.is_empty() {
        return Ranking::Empty;
    }

    let mut ranked: Vec<RankedPaper> = candidates
        .into_iter()
        .map(|paper| {
            let reason = match_reason(&paper, filter);
            RankedPaper {
                matched: !reason.is_empty(),
                paper,
                reason,
            }
        })
        .collect();
    // Stable: unmatched keep their relative order.
    ranked.sort_by_key(|p| !p.matched);
    Ranking::Papers(ranked)
}

/// Works out what a paper matches on.
///
/// A non-empty text query takes exclusive priority over active keywords and authors.
pub fn match_reason(paper: &Paper, filter: &FilterState) -> MatchReason {
    if let Some(query) = filter.active_query() {
        let matched = contains_ignore_case(&paper.search_text(), query);
        return MatchReason {
            query: matched.then(|| query.to_string()),
            ..MatchReason::default()
        };
    }

    let keyword_text = paper.keyword_text().to_lowercase();
    let author_text = paper.joined_authors().to_lowercase();
    MatchReason {
        keywords: matching_terms(&keyword_text, filter.active_keywords()),
        authors: matching_terms(&author_text, filter.active_authors()),
        query: None,
    }
}

/// Papers whose title or summary mentions `keyword`, in category order.
pub fn related_papers(papers: &CategoryMap, keyword: &str) -> Vec<Arc<Paper>> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Vec::new();
    }
    papers
        .all()
        .into_iter()
        .filter(|paper| contains_ignore_case(&paper.keyword_text(), keyword))
        .collect()
}

/// Terms that occur in an already lower-cased haystack.
fn matching_terms(lower_haystack: &str, terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .filter(|term| lower_haystack.contains(&term.to_lowercase()))
        .cloned()
        .collect()
}

/// Case-insensitive substring test.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn paper(id: &str, category: &str, title: &str, summary: &str, authors: &[&str]) -> Paper {
        Paper {
            id: id.into(),
            title: title.into(),
            authors: authors.iter().map(|a| (*a).to_string()).collect(),
            categories: vec![category.into()],
            summary: summary.into(),
            long_abstract: String::new(),
            motivation: None,
            method: None,
            result: None,
            conclusion: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            url: format!("https://arxiv.org/abs/{id}"),
            code_url: None,
            code_stars: None,
            code_last_update: None,
        }
    }

    fn collection(papers: Vec<Paper>) -> CategoryMap {
        let mut map = CategoryMap::new();
        for p in papers {
            map.insert(Arc::new(p));
        }
        map
    }

    fn ids(ranking: &Ranking) -> Vec<String> {
        ranking.papers().iter().map(|p| p.paper.id.clone()).collect()
    }

    #[test]
    fn test_keyword_in_summary_matches() {
        let p = paper("1", "cs.AI", "Agents", "We scale LLM inference.", &["A"]);
        let filter = FilterState::seeded(&["llm".into()], &[]);
        let reason = match_reason(&p, &filter);
        assert_eq!(reason.keywords, ["llm"]);
    }

    #[test]
    fn test_matched_first_stable() {
        let map = collection(vec![
            paper("P1", "cs.AI", "plain", "", &["A"]),
            paper("P2", "cs.AI", "graph methods", "", &["A"]),
            paper("P3", "cs.AI", "plain", "", &["A"]),
            paper("P4", "cs.AI", "another graph", "", &["A"]),
        ]);
        let filter = FilterState::seeded(&["graph".into()], &[]);
        let ranking = rank(&map, &filter);
        assert_eq!(ids(&ranking), ["P2", "P4", "P1", "P3"]);
        assert_eq!(ranking.matched(), 2);
    }

    #[test]
    fn test_author_match_records_author() {
        let map = collection(vec![
            paper("1", "cs.AI", "x", "", &["Yann LeCun"]),
            paper("2", "cs.AI", "y", "", &["Geoffrey Hinton", "Other"]),
        ]);
        let filter = FilterState::seeded(&[], &["hinton".into()]);
        let ranking = rank(&map, &filter);
        let first = &ranking.papers()[0];
        assert_eq!(first.paper.id, "2");
        assert_eq!(first.reason.authors, ["hinton"]);
        assert!(first.reason.keywords.is_empty());
    }

    #[test]
    fn test_query_takes_priority() {
        let mut p = paper("1", "cs.AI", "x", "", &["A"]);
        p.conclusion = Some("Works on Robots".into());
        let map = collection(vec![paper("0", "cs.AI", "llm", "", &["A"]), p]);

        let mut filter = FilterState::seeded(&["llm".into()], &[]);
        filter.set_query("robots");
        let ranking = rank(&map, &filter);
        assert_eq!(ids(&ranking), ["1", "0"]);
        assert_eq!(ranking.papers()[0].reason.query.as_deref(), Some("robots"));
        assert!(!ranking.papers()[1].matched);
    }

    #[test]
    fn test_category_restriction() {
        let map = collection(vec![
            paper("1", "cs.LG", "a", "", &["A"]),
            paper("2", "cs.AI", "b", "", &["A"]),
        ]);
        let mut filter = FilterState::default();
        assert_eq!(ids(&rank(&map, &filter)), ["2", "1"]);

        filter.set_category(Category::Named("cs.LG".into()));
        assert_eq!(ids(&rank(&map, &filter)), ["1"]);

        filter.set_category(Category::Named("cs.RO".into()));
        assert!(rank(&map, &filter).is_empty());
    }

    #[test]
    fn test_empty_collection_is_empty_ranking() {
        assert!(rank(&CategoryMap::new(), &FilterState::default()).is_empty());
    }

    #[test]
    fn test_related_papers() {
        let map = collection(vec![
            paper("1", "cs.AI", "Robust Neural Networks", "", &["A"]),
            paper("2", "cs.AI", "Other", "a robust optimizer", &["A"]),
            paper("3", "cs.AI", "Unrelated", "", &["Robust Author"]),
        ]);
        let related: Vec<_> = related_papers(&map, "ROBUST")
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(related, ["1", "2"]);
        assert!(related_papers(&map, " ").is_empty());
    }
}
