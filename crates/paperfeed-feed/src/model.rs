//! Papers and their grouping by primary category.

use std::{collections::BTreeMap, sync::Arc};

use chrono::NaiveDate;
use serde::Serialize;

/// A summarized paper parsed from one line of a data file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paper {
    /// arXiv identifier. May be empty when the record carried only links.
    pub id: String,
    /// Paper title.
    pub title: String,
    /// Author names in publication order.
    pub authors: Vec<String>,
    /// Categories, primary first. Never empty.
    pub categories: Vec<String>,
    /// Short summary: the AI TL;DR when present, else the abstract.
    pub summary: String,
    /// Full abstract.
    pub long_abstract: String,
    /// Structured AI field: why the work was done.
    pub motivation: Option<String>,
    /// Structured AI field: how it was done.
    pub method: Option<String>,
    /// Structured AI field: what was found.
    pub result: Option<String>,
    /// Structured AI field: the takeaway.
    pub conclusion: Option<String>,
    /// Date of the data file the paper came from.
    pub date: NaiveDate,
    /// Abstract page URL.
    pub url: String,
    /// Code repository URL.
    pub code_url: Option<String>,
    /// Repository star count.
    pub code_stars: Option<u64>,
    /// Repository last update, as published.
    pub code_last_update: Option<String>,
}

impl Paper {
    /// The first listed category.
    pub fn primary_category(&self) -> &str {
        self.categories.first().map_or("", String::as_str)
    }

    /// Authors joined with `", "`.
    pub fn joined_authors(&self) -> String {
        self.authors.join(", ")
    }

    /// PDF link derived from the abstract URL.
    pub fn pdf_url(&self) -> String {
        self.url.replacen("abs", "pdf", 1)
    }

    /// HTML rendering link derived from the abstract URL.
    pub fn html_url(&self) -> String {
        self.url.replacen("abs", "html", 1)
    }

    /// Title and summary, the text keyword filters look at.
    pub fn keyword_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }

    /// Every textual field concatenated, the text free-text search looks at.
    pub fn search_text(&self) -> String {
        let optional = [
            &self.motivation,
            &self.method,
            &self.result,
            &self.conclusion,
        ];
        let mut text = format!(
            "{} {} {} {} {}",
            self.title,
            self.joined_authors(),
            self.categories.join(", "),
            self.summary,
            self.long_abstract
        );
        for field in optional.into_iter().flatten() {
            text.push(' ');
            text.push_str(field);
        }
        text
    }
}

/// Papers grouped by primary category, categories in alphabetical order.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    /// Category name to papers in load order.
    buckets: BTreeMap<String, Vec<Arc<Paper>>>,
}

impl CategoryMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a paper under its primary category.
    pub fn insert(&mut self, paper: Arc<Paper>) {
        self.buckets
            .entry(paper.primary_category().to_string())
            .or_default()
            .push(paper);
    }

    /// Appends every bucket of `other` onto the matching bucket here.
    pub fn merge(&mut self, other: Self) {
        for (category, papers) in other.buckets {
            self.buckets.entry(category).or_default().extend(papers);
        }
    }

    /// Total number of papers.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True when no papers are loaded.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Papers in one category, if present.
    pub fn get(&self, category: &str) -> Option<&[Arc<Paper>]> {
        self.buckets.get(category).map(Vec::as_slice)
    }

    /// Category names in alphabetical order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Buckets in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Arc<Paper>])> {
        self.buckets
            .iter()
            .map(|(category, papers)| (category.as_str(), papers.as_slice()))
    }

    /// Every paper, buckets concatenated alphabetically.
    pub fn all(&self) -> Vec<Arc<Paper>> {
        self.buckets.values().flatten().cloned().collect()
    }

    /// Per-category counts for category tabs.
    pub fn summary(&self) -> CategorySummary {
        let counts: Vec<(String, usize)> = self
            .buckets
            .iter()
            .map(|(category, papers)| (category.clone(), papers.len()))
            .collect();
        let total = counts.iter().map(|(_, count)| count).sum();
        CategorySummary { counts, total }
    }
}

/// Category counts, alphabetical, with the overall total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Category name and paper count.
    pub counts: Vec<(String, usize)>,
    /// Sum of all counts.
    pub total: usize,
}
