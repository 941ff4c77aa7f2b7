use crate::chess::{Color, Move};
use crate::search::Depth;
use crate::util::Int;
use derive_more::with_trait::Debug;

/// The [history heuristic] table, indexed by side to move and the squares of a [`Move`].
///
/// [history heuristic]: https://www.chessprogramming.org/History_Heuristic
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[debug("History")]
pub struct History(Box<[[[i32; 64]; 64]; 2]>);

impl Default for History {
    #[inline(always)]
    fn default() -> Self {
        History(Box::new([[[0; 64]; 64]; 2]))
    }
}

impl History {
    /// The maximum magnitude of any entry.
    pub const LIMIT: i32 = 900_000;

    /// The accumulated bonus for a quiet [`Move`] played by `side`.
    #[inline(always)]
    pub fn get(&self, side: Color, m: Move) -> i32 {
        self.0[side.cast::<usize>()][m.whence().cast::<usize>()][m.whither().cast::<usize>()]
    }

    /// Rewards a quiet [`Move`] that caused a cutoff at the given [`Depth`].
    ///
    /// All entries are halved whenever one would exceed [`History::LIMIT`].
    pub fn update(&mut self, side: Color, m: Move, depth: Depth) {
        let bonus = depth.cast::<i32>().pow(2);
        let (from, to) = (m.whence().cast::<usize>(), m.whither().cast::<usize>());
        let entry = &mut self.0[side.cast::<usize>()][from][to];
        *entry += bonus;

        if *entry > Self::LIMIT {
            self.0.iter_mut().flatten().flatten().for_each(|h| *h /= 2);
        }
    }

    /// Resets all entries.
    #[inline(always)]
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
