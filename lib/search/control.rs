use crate::search::Limits;
use crate::util::Int;
use std::time::{Duration, Instant};

/// Decides whether the search may start another iteration.
#[derive(Debug, Clone)]
pub struct Control {
    timestamp: Instant,
    limits: Limits,
}

impl Control {
    /// Sets up the controller for a new search.
    #[inline(always)]
    pub fn new(limits: Limits) -> Self {
        Control {
            timestamp: Instant::now(),
            limits,
        }
    }

    /// The time elapsed so far.
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.timestamp)
    }

    /// Whether the budget has been spent, given the nodes visited so far and the depth
    /// completed last.
    #[inline(always)]
    pub fn is_exhausted(&self, nodes: u64, depth: i8) -> bool {
        depth >= self.limits.max_depth().get()
            || nodes >= self.limits.max_nodes()
            || self.elapsed() >= self.limits.max_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Depth;
    use crate::util::Int;
    use test_strategy::proptest;

    #[proptest]
    fn exhausted_once_depth_is_reached(#[strategy(1i8..=63)] d: i8) {
        let ctrl = Control::new(Limits::depth(Depth::new(d)));
        assert!(!ctrl.is_exhausted(0, d - 1));
        assert!(ctrl.is_exhausted(0, d));
    }

    #[proptest]
    fn exhausted_once_nodes_are_visited(#[strategy(1u64..)] n: u64) {
        let ctrl = Control::new(Limits::nodes(n));
        assert!(!ctrl.is_exhausted(n - 1, 0));
        assert!(ctrl.is_exhausted(n, 0));
    }

    #[test]
    fn exhausted_immediately_without_time() {
        let ctrl = Control::new(Limits::time(Duration::ZERO));
        assert!(ctrl.is_exhausted(0, 0));
    }

    #[test]
    fn unlimited_search_is_never_exhausted_early() {
        let ctrl = Control::new(Limits::none());
        assert!(!ctrl.is_exhausted(u64::MAX - 1, 62));
    }
}
