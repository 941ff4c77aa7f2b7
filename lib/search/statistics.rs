use std::ops::AddAssign;

/// Counters collected while searching.
///
/// These are observational only and never influence the search.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Statistics {
    /// Nodes visited by the principal variation search.
    pub nodes: u64,
    /// Entries into the quiescence search.
    pub leaves: u64,
    /// Nodes visited by the quiescence search.
    pub qnodes: u64,
}

impl Statistics {
    /// The total number of nodes visited.
    #[inline(always)]
    pub fn total(&self) -> u64 {
        self.nodes + self.qnodes
    }
}

impl AddAssign for Statistics {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.leaves += rhs.leaves;
        self.qnodes += rhs.qnodes;
    }
}
