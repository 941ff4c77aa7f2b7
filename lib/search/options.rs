/// Configuration of the [`Engine`][`crate::search::Engine`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Options {
    /// The size of the transposition table in bytes.
    #[cfg_attr(test, strategy(0usize..1 << 16))]
    pub hash: usize,

    /// The maximum depth of the quiescence search.
    pub quiescence: u8,

    /// Whether to prune with [null moves].
    ///
    /// Zugzwang is only approximated: the null move is skipped when the side to move has
    /// nothing but pawns and its king, and there is no verification search. Positions where
    /// passing would be an advantage despite other material may be misjudged.
    ///
    /// [null moves]: https://www.chessprogramming.org/Null_Move_Pruning
    pub null_move: bool,

    /// The depth reduction of null move searches.
    pub null_move_reduction: u8,

    /// Whether to apply [late move reductions].
    ///
    /// [late move reductions]: https://www.chessprogramming.org/Late_Move_Reductions
    pub lmr: bool,

    /// The number of moves searched at full depth before reducing.
    pub lmr_prefix: usize,

    /// The move index from which reductions are doubled.
    pub lmr_deep: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            hash: 16 << 20,
            quiescence: 16,
            null_move: true,
            null_move_reduction: 3,
            lmr: true,
            lmr_prefix: 3,
            lmr_deep: 6,
        }
    }
}

impl Options {
    /// Set the size of the transposition table in bytes.
    #[must_use]
    #[inline(always)]
    pub fn with_hash(mut self, hash: usize) -> Self {
        self.hash = hash;
        self
    }

    /// Set the maximum depth of the quiescence search.
    #[must_use]
    #[inline(always)]
    pub fn with_quiescence(mut self, depth: u8) -> Self {
        self.quiescence = depth;
        self
    }

    /// Enable or disable null move pruning.
    #[must_use]
    #[inline(always)]
    pub fn with_null_move(mut self, enabled: bool) -> Self {
        self.null_move = enabled;
        self
    }

    /// Set the depth reduction of null move searches.
    #[must_use]
    #[inline(always)]
    pub fn with_null_move_reduction(mut self, r: u8) -> Self {
        self.null_move_reduction = r;
        self
    }

    /// Enable or disable late move reductions.
    #[must_use]
    #[inline(always)]
    pub fn with_lmr(mut self, enabled: bool) -> Self {
        self.lmr = enabled;
        self
    }

    /// Set the number of moves searched before reducing, and the index from which reductions
    /// are doubled.
    #[must_use]
    #[inline(always)]
    pub fn with_lmr_schedule(mut self, prefix: usize, deep: usize) -> Self {
        self.lmr_prefix = prefix;
        self.lmr_deep = deep;
        self
    }
}
