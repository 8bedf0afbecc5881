//! The user's current filter: active terms, text query and category.

use serde::Serialize;

/// Category restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Category {
    /// Every category, concatenated alphabetically.
    #[default]
    All,
    /// Only papers whose primary category is this one.
    Named(String),
}

impl Category {
    /// Parses a user-supplied name; `all` (any case) or blank means [`Category::All`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(name.to_string())
        }
    }
}

/// Active sets saved when a text query suspends them.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Suspended {
    /// Keywords active before the query.
    keywords: Vec<String>,
    /// Authors active before the query.
    authors: Vec<String>,
}

/// What the ranking is computed from.
///
/// Keyword and author sets keep insertion order and hold no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Active keywords.
    active_keywords: Vec<String>,
    /// Active authors.
    active_authors: Vec<String>,
    /// Free-text query as typed.
    text_query: String,
    /// Category restriction.
    category: Category,
    /// Sets captured when the current query became non-empty.
    suspended: Option<Suspended>,
}

impl FilterState {
    /// Creates a state with the given terms active.
    pub fn seeded(keywords: &[String], authors: &[String]) -> Self {
        let mut state = Self::default();
        for keyword in keywords {
            insert_unique(&mut state.active_keywords, keyword);
        }
        for author in authors {
            insert_unique(&mut state.active_authors, author);
        }
        state
    }

    /// Active keywords in activation order.
    pub fn active_keywords(&self) -> &[String] {
        &self.active_keywords
    }

    /// Active authors in activation order.
    pub fn active_authors(&self) -> &[String] {
        &self.active_authors
    }

    /// The text query as typed.
    pub fn text_query(&self) -> &str {
        &self.text_query
    }

    /// The trimmed query, or `None` when text search is off.
    pub fn active_query(&self) -> Option<&str> {
        let trimmed = self.text_query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// The category restriction.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Restricts to a category.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Turns a keyword on or off. Returns true if it is now active.
    pub fn toggle_keyword(&mut self, keyword: &str) -> bool {
        toggle(&mut self.active_keywords, keyword)
    }

    /// Turns an author on or off. Returns true if it is now active.
    pub fn toggle_author(&mut self, author: &str) -> bool {
        toggle(&mut self.active_authors, author)
    }

    /// Turns a keyword on. Returns false if it was already active or is blank.
    pub fn activate_keyword(&mut self, keyword: &str) -> bool {
        insert_unique(&mut self.active_keywords, keyword)
    }

    /// Turns an author on. Returns false if it was already active or is blank.
    pub fn activate_author(&mut self, author: &str) -> bool {
        insert_unique(&mut self.active_authors, author)
    }

    /// Deactivates every keyword.
    pub fn clear_keywords(&mut self) {
        self.active_keywords.clear();
    }

    /// Deactivates every author.
    pub fn clear_authors(&mut self) {
        self.active_authors.clear();
    }

    /// Updates the text query.
    ///
    /// The first non-empty query captures and clears the active keywords and authors;
    /// later non-empty updates keep them cleared without capturing again. An empty query
    /// restores exactly what was captured.
    pub fn set_query(&mut self, query: &str) {
        self.text_query = query.to_string();
        if self.active_query().is_some() {
            if self.suspended.is_none() {
                self.suspended = Some(Suspended {
                    keywords: self.active_keywords.clone(),
                    authors: self.active_authors.clone(),
                });
            }
            self.active_keywords.clear();
            self.active_authors.clear();
        } else if let Some(saved) = self.suspended.take() {
            self.active_keywords = saved.keywords;
            self.active_authors = saved.authors;
        }
    }

    /// Clears the text query, restoring suspended terms.
    pub fn clear_query(&mut self) {
        self.set_query("");
    }
}

/// Adds `term` unless it is blank or already present.
fn insert_unique(set: &mut Vec<String>, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() || set.iter().any(|t| t == term) {
        return false;
    }
    set.push(term.to_string());
    true
}

/// Removes `term` if present, otherwise adds it.
fn toggle(set: &mut Vec<String>, term: &str) -> bool {
    let term = term.trim();
    if let Some(pos) = set.iter().position(|t| t == term) {
        set.remove(pos);
        false
    } else {
        insert_unique(set, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut state = FilterState::default();
        assert!(state.toggle_keyword("llm"));
        assert!(state.toggle_keyword("rag"));
        assert!(!state.toggle_keyword("llm"));
        assert_eq!(state.active_keywords(), ["rag"]);
        assert!(!state.toggle_author("  "));
        assert!(state.active_authors().is_empty());
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut state = FilterState::seeded(&["llm".into()], &[]);
        assert!(!state.activate_keyword("llm"));
        assert!(state.activate_keyword("rag"));
        assert!(state.activate_author("Hinton"));
        assert_eq!(state.active_keywords(), ["llm", "rag"]);
        assert_eq!(state.active_authors(), ["Hinton"]);
    }

    #[test]
    fn test_query_suspends_and_restores_terms() {
        let mut state = FilterState::seeded(&["llm".into()], &["Hinton".into()]);
        state.set_query("d");
        assert!(state.active_keywords().is_empty());
        assert!(state.active_authors().is_empty());

        state.set_query("di");
        state.set_query("diffusion");
        state.clear_query();
        assert_eq!(state.active_keywords(), ["llm"]);
        assert_eq!(state.active_authors(), ["Hinton"]);
        assert_eq!(state.active_query(), None);
    }

    #[test]
    fn test_toggles_during_query_are_discarded_on_clear() {
        let mut state = FilterState::seeded(&["llm".into()], &[]);
        state.set_query("vision");
        state.toggle_keyword("agents");
        state.set_query("vision transformer");
        assert!(state.active_keywords().is_empty());
        state.clear_query();
        assert_eq!(state.active_keywords(), ["llm"]);
    }

    #[test]
    fn test_whitespace_query_is_inactive() {
        let mut state = FilterState::seeded(&["llm".into()], &[]);
        state.set_query("   ");
        assert_eq!(state.active_query(), None);
        assert_eq!(state.active_keywords(), ["llm"]);
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(Category::from_name("All"), Category::All);
        assert_eq!(Category::from_name(""), Category::All);
        assert_eq!(
            Category::from_name("cs.AI"),
            Category::Named("cs.AI".into())
        );
    }

    #[test]
    fn test_seeded_deduplicates() {
        let state = FilterState::seeded(&["a".into(), "a".into(), "b".into()], &[]);
        assert_eq!(state.active_keywords(), ["a", "b"]);
    }
}
