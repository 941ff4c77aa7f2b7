use crate::eval::Value;
use crate::search::Ply;
use crate::util::{Bounded, Int};

/// The distance to a forced mate, if any.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Mate {
    #[default]
    None,
    Mating(Ply),
    Mated(Ply),
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct ScoreRepr(#[cfg_attr(test, strategy(Self::MIN..=Self::MAX))] <Self as Int>::Repr);

unsafe impl Int for ScoreRepr {
    type Repr = i16;
    const MIN: Self::Repr = -Self::MAX;
    const MAX: Self::Repr = 32000;
}

/// A search score in centipawns, or a mate distance encoded near the extremes.
pub type Score = Bounded<ScoreRepr>;

// Every mate distance must land outside the range of static values.
const _: () = assert!(Value::MAX < Score::MAX - Ply::MAX);

impl Score {
    /// The score of delivering mate `ply` half-moves away.
    #[inline(always)]
    pub fn mating(ply: Ply) -> Self {
        Self::upper() - ply
    }

    /// The score of getting mated `ply` half-moves away.
    #[inline(always)]
    pub fn mated(ply: Ply) -> Self {
        -Self::mating(ply)
    }

    /// Decodes the mate distance.
    #[inline(always)]
    pub fn mate(&self) -> Mate {
        let distance = Score::MAX - self.get().abs();
        match distance.convert::<Ply>() {
            Some(d) if *self > 0i16 => Mate::Mating(d),
            Some(d) => Mate::Mated(d),
            None => Mate::None,
        }
    }

    /// Rebases a mate found `ply` half-moves from the root onto the node itself.
    ///
    /// This is how scores are kept in the transposition table, where the same node
    /// may be reached at any ply.
    #[inline(always)]
    pub fn stored(&self, ply: Ply) -> Self {
        match self.mate() {
            Mate::Mating(d) => Self::mating(d - ply),
            Mate::Mated(d) => Self::mated(d - ply),
            Mate::None => *self,
        }
    }

    /// The inverse of [`Score::stored`].
    #[inline(always)]
    pub fn loaded(&self, ply: Ply) -> Self {
        match self.mate() {
            Mate::Mating(d) => Self::mating(d + ply),
            Mate::Mated(d) => Self::mated(d + ply),
            Mate::None => *self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn static_values_are_never_mates(v: Value) {
        assert_eq!(v.saturate::<Score>().mate(), Mate::None);
    }

    #[proptest]
    fn mate_distance_is_decoded(p: Ply) {
        assert_eq!(Score::mating(p).mate(), Mate::Mating(p));
        assert_eq!(Score::mated(p).mate(), Mate::Mated(p));
    }

    #[proptest]
    fn quicker_mates_are_more_extreme(p: Ply, #[filter(#p < #q)] q: Ply) {
        assert!(Score::mating(p) > Score::mating(q));
        assert!(Score::mated(p) < Score::mated(q));
    }

    #[proptest]
    fn storing_leaves_ordinary_scores_alone(
        #[filter(#s.mate() == Mate::None)] s: Score,
        p: Ply,
    ) {
        assert_eq!(s.stored(p), s);
        assert_eq!(s.loaded(p), s);
    }

    #[proptest]
    fn loading_restores_stored_mates(p: Ply, #[filter(#q <= #p)] q: Ply) {
        assert_eq!(Score::mating(p).stored(q).loaded(q), Score::mating(p));
        assert_eq!(Score::mated(p).stored(q).loaded(q), Score::mated(p));
    }

    #[test]
    fn mate_found_deeper_is_stored_closer() {
        let s = Score::mating(Ply::new(7)).stored(Ply::new(4));
        assert_eq!(s.mate(), Mate::Mating(Ply::new(3)));
    }
}
