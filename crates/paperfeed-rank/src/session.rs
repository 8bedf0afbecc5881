//! Everything a user session holds between actions.

use std::sync::Arc;

use paperfeed_feed::{CategoryMap, LoadError, Paper};
use rand::Rng;
use tracing::debug;

use crate::{
    FilterState, KeyValueStore, Navigator, PreferenceStore, Ranking, rank,
};

/// Where the most recent load stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// The latest load failed.
    Failed(String),
    /// Papers are loaded; the collection may be empty.
    Ready,
}

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Loaded papers, filter, preferences and navigation for one user.
///
/// Only the most recently issued load may replace the collection, so a slow earlier
/// request cannot overwrite a newer one.
#[derive(Debug)]
pub struct Session<S> {
    /// The collection currently shown.
    papers: CategoryMap,
    /// Current filter.
    filter: FilterState,
    /// Saved preferences.
    prefs: PreferenceStore<S>,
    /// Generation of the latest issued load.
    generation: u64,
    /// State of the latest load.
    state: LoadState,
    /// Open detail navigation.
    navigator: Option<Navigator>,
}

impl<S: KeyValueStore> Session<S> {
    /// Starts a session with the filter seeded from saved preferences.
    pub fn new(prefs: PreferenceStore<S>) -> Self {
        let filter = FilterState::seeded(prefs.keywords(), prefs.authors());
        Self {
            papers: CategoryMap::new(),
            filter,
            prefs,
            generation: 0,
            state: LoadState::Idle,
            navigator: None,
        }
    }

    /// Issues a ticket for a new load, superseding any in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Applies a load result if `ticket` is the latest issued. Returns whether it applied.
    ///
    /// A missing date is not a failure: it yields an empty collection.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<CategoryMap, LoadError>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                latest = self.generation,
                "discarding stale load"
            );
            return false;
        }
        match result {
            Ok(papers) => {
                self.papers = papers;
                self.state = LoadState::Ready;
            }
            Err(LoadError::NotFound { .. }) => {
                self.papers = CategoryMap::new();
                self.state = LoadState::Ready;
            }
            Err(err) => {
                self.papers = CategoryMap::new();
                self.state = LoadState::Failed(err.to_string());
            }
        }
        true
    }

    /// State of the latest load.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The loaded collection.
    pub fn papers(&self) -> &CategoryMap {
        &self.papers
    }

    /// Current filter.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Mutable filter.
    pub fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    /// Saved preferences.
    pub fn prefs(&self) -> &PreferenceStore<S> {
        &self.prefs
    }

    /// Mutable saved preferences.
    pub fn prefs_mut(&mut self) -> &mut PreferenceStore<S> {
        &mut self.prefs
    }

    /// Ranks the collection against the filter.
    pub fn ranking(&self) -> Ranking {
        rank(&self.papers, &self.filter)
    }

    /// Opens the paper at a 0-based ranked index.
    pub fn open(&mut self, index: usize) -> Option<&Arc<Paper>> {
        self.navigator = Navigator::open(self.ranking().snapshot(), index);
        self.navigator.as_ref().map(Navigator::current)
    }

    /// Opens a random ranked paper.
    pub fn open_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Arc<Paper>> {
        self.navigator = Navigator::open_random(self.ranking().snapshot(), rng);
        self.navigator.as_ref().map(Navigator::current)
    }

    /// The open navigation, if any.
    pub fn navigator(&self) -> Option<&Navigator> {
        self.navigator.as_ref()
    }

    /// Mutable open navigation.
    pub fn navigator_mut(&mut self) -> Option<&mut Navigator> {
        self.navigator.as_mut()
    }

    /// Closes the detail navigation.
    pub fn close(&mut self) {
        self.navigator = None;
    }
}
