use crate::chess::Move;

/// The two most recent quiet [`Move`]s that caused a cutoff at some ply.
///
/// See [killer heuristic].
///
/// [killer heuristic]: https://www.chessprogramming.org/Killer_Heuristic
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Killers([Option<Move>; 2]);

impl Killers {
    /// Records a killer [`Move`], evicting the oldest one.
    #[inline(always)]
    pub fn insert(&mut self, m: Move) {
        if self.0[0] != Some(m) {
            self.0[1] = self.0[0];
            self.0[0] = Some(m);
        }
    }

    /// The slot holding `m`, where `0` is the most recent killer.
    #[inline(always)]
    pub fn slot(&self, m: Move) -> Option<usize> {
        self.0.iter().position(|k| *k == Some(m))
    }

    /// Whether `m` is a killer [`Move`].
    #[inline(always)]
    pub fn contains(&self, m: Move) -> bool {
        self.slot(m).is_some()
    }
}
