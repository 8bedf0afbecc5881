//! Stepping through a ranked list one paper at a time.

use std::sync::Arc;

use paperfeed_feed::Paper;
use rand::Rng;

/// Position within a snapshot of ranked papers.
///
/// The snapshot is taken when navigation opens, so reloading data does not move or
/// invalidate it.
#[derive(Debug, Clone)]
pub struct Navigator {
    /// Papers in ranked order.
    papers: Vec<Arc<Paper>>,
    /// Current 0-based index, always in bounds.
    index: usize,
}

impl Navigator {
    /// Opens at `index`. `None` if the index is out of bounds.
    pub fn open(papers: Vec<Arc<Paper>>, index: usize) -> Option<Self> {
        (index < papers.len()).then_some(Self { papers, index })
    }

    /// Opens at a uniformly random paper. `None` if there are no papers.
    pub fn open_random<R: Rng + ?Sized>(papers: Vec<Arc<Paper>>, rng: &mut R) -> Option<Self> {
        if papers.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..papers.len());
        Some(Self { papers, index })
    }

    /// The paper at the current position.
    pub fn current(&self) -> &Arc<Paper> {
        &self.papers[self.index]
    }

    /// 1-based position, as shown to users.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Number of papers in the snapshot.
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// Always false; an open navigator has at least one paper.
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Moves forward, wrapping to the first paper.
    pub fn next_paper(&mut self) -> &Arc<Paper> {
        self.index = (self.index + 1) % self.papers.len();
        self.current()
    }

    /// Moves back, wrapping to the last paper.
    pub fn previous_paper(&mut self) -> &Arc<Paper> {
        self.index = (self.index + self.papers.len() - 1) % self.papers.len();
        self.current()
    }

    /// Jumps to a uniformly random paper.
    pub fn random_paper<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Arc<Paper> {
        self.index = rng.gen_range(0..self.papers.len());
        self.current()
    }
}
