use crate::search::Depth;
use crate::util::Int;
use std::time::Duration;

/// How much a search may spend. Limits left unset never stop the search.
///
/// They are only checked between iterations, and the first iteration always completes.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Limits {
    pub depth: Option<Depth>,
    pub nodes: Option<u64>,
    pub time: Option<Duration>,
}

impl Limits {
    /// No limits at all.
    #[inline(always)]
    pub fn none() -> Self {
        Limits::default()
    }

    #[inline(always)]
    pub fn depth(depth: Depth) -> Self {
        Limits::none().with_depth(depth)
    }

    #[inline(always)]
    pub fn nodes(nodes: u64) -> Self {
        Limits::none().with_nodes(nodes)
    }

    #[inline(always)]
    pub fn time(time: Duration) -> Self {
        Limits::none().with_time(time)
    }

    #[must_use]
    #[inline(always)]
    pub fn with_depth(self, depth: Depth) -> Self {
        let depth = Some(depth);
        Limits { depth, ..self }
    }

    #[must_use]
    #[inline(always)]
    pub fn with_nodes(self, nodes: u64) -> Self {
        let nodes = Some(nodes);
        Limits { nodes, ..self }
    }

    #[must_use]
    #[inline(always)]
    pub fn with_time(self, time: Duration) -> Self {
        let time = Some(time);
        Limits { time, ..self }
    }

    /// The deepest iteration allowed, [`Depth::upper`] if unset.
    #[inline(always)]
    pub fn max_depth(&self) -> Depth {
        self.depth.unwrap_or_else(Depth::upper)
    }

    /// The node budget, [`u64::MAX`] if unset.
    #[inline(always)]
    pub fn max_nodes(&self) -> u64 {
        self.nodes.unwrap_or(u64::MAX)
    }

    /// The time budget, [`Duration::MAX`] if unset.
    #[inline(always)]
    pub fn max_time(&self) -> Duration {
        self.time.unwrap_or(Duration::MAX)
    }
}
