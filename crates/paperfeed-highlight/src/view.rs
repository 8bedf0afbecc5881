//! What the feed area shows.

use paperfeed_rank::{FilterState, LoadState, MatchReason, Ranking};

use crate::{Card, cards};

/// Shown while a load is in flight.
pub const LOADING_MESSAGE: &str = "Loading papers...";
/// Shown when a load succeeded but there is nothing to list.
pub const EMPTY_MESSAGE: &str = "No papers found for this date.";
/// Shown when a load failed.
pub const FAILED_MESSAGE: &str = "Loading data failed. Please retry.";

/// The feed area, with "nothing to show" kept apart from loading and failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    /// A load is in flight or none has been requested.
    Loading,
    /// The latest load failed with this error text.
    Failed(String),
    /// Loaded, but the current category has no papers.
    Empty,
    /// Cards in ranked order.
    Papers(Vec<Card>),
}

impl FeedView {
    /// Derives the view from the session's load state and current ranking.
    pub fn new(state: &LoadState, ranking: &Ranking, filter: &FilterState) -> Self {
        match state {
            LoadState::Idle | LoadState::Loading => Self::Loading,
            LoadState::Failed(message) => Self::Failed(message.clone()),
            LoadState::Ready if ranking.is_empty() => Self::Empty,
            LoadState::Ready => Self::Papers(cards(ranking, filter)),
        }
    }
}

/// One-line description of a match, e.g. `keywords: llm | authors: Hinton`.
pub fn reason_text(reason: &MatchReason) -> String {
    let mut parts = Vec::new();
    if !reason.keywords.is_empty() {
        parts.push(format!("keywords: {}", reason.keywords.join(", ")));
    }
    if !reason.authors.is_empty() {
        parts.push(format!("authors: {}", reason.authors.join(", ")));
    }
    if let Some(query) = &reason.query {
        parts.push(format!("text: {query}"));
    }
    parts.join(" | ")
}
