//! Filtering, ranking and session state for paperfeed.
//!
//! Ranking is a pure function of a loaded [`CategoryMap`](paperfeed_feed::CategoryMap) and a
//! [`FilterState`]. A [`Session`] ties the collection, the filter, saved preferences and
//! detail navigation together.

#![warn(missing_docs)]

mod filter;
mod navigate;
mod prefs;
mod rank;
mod session;

pub use filter::{Category, FilterState};
pub use navigate::Navigator;
pub use prefs::{
    AUTHORS_KEY, JsonFileStore, KEYWORDS_KEY, KeyValueStore, KeywordPreferences, MemoryStore,
    PreferenceStore, PrefsError,
};
pub use rank::{MatchReason, RankedPaper, Ranking, match_reason, rank, related_papers};
pub use session::{LoadState, LoadTicket, Session};
