use crate::chess::Move;
use crate::search::{Depth, Line, Score, Statistics};
use derive_more::with_trait::Constructor;
use std::time::Duration;

/// The principal variation reported with each iteration.
pub type Pv = Line<32>;

/// Information about a completed iteration of the search.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Constructor)]
pub struct Info {
    depth: Depth,
    time: Duration,
    nodes: u64,
    stats: Statistics,
    score: Score,
    pv: Pv,
}

impl Info {
    /// The depth searched.
    #[inline(always)]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// The duration searched.
    #[inline(always)]
    pub fn time(&self) -> Duration {
        self.time
    }

    /// The number of nodes searched since the search started.
    #[inline(always)]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// The counters collected during this iteration.
    #[inline(always)]
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// The search score.
    #[inline(always)]
    pub fn score(&self) -> Score {
        self.score
    }

    /// The best move, if any.
    #[inline(always)]
    pub fn best(&self) -> Option<Move> {
        self.pv.head()
    }

    /// The principal variation.
    #[inline(always)]
    pub fn pv(&self) -> &Pv {
        &self.pv
    }

    /// The number of nodes searched per second.
    #[inline(always)]
    pub fn nps(&self) -> f64 {
        self.nodes as f64 / self.time.as_secs_f64().max(1e-9)
    }
}
