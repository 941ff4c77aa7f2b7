use crate::chess::Move;
use crate::util::Bounded;
use arrayvec::ArrayVec;

#[cfg(test)]
use proptest::{collection::vec, prelude::*};

/// How promising a [`Move`] looks, higher is searched first.
pub type Rating = Bounded<i32>;

/// A [`Move`] and its [`Rating`].
pub type RatedMove = (Move, Rating);

/// The moves of a node, rated and then handed out best first.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Moves {
    #[cfg_attr(test, strategy(vec(any::<RatedMove>(), 0..=10usize)
        .prop_map(ArrayVec::from_iter)))]
    entries: ArrayVec<RatedMove, 256>,

    // entries[..ordered] are already in their final order.
    #[cfg_attr(test, strategy(Just(0)))]
    ordered: usize,
}

impl Moves {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The moves in storage order.
    #[inline(always)]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Move> + DoubleEndedIterator + '_ {
        self.entries.iter().map(|&(m, _)| m)
    }

    /// Rates every move with `f`, forgetting any previous order.
    #[inline(always)]
    pub fn sort<F: FnMut(Move) -> Rating>(&mut self, mut f: F) {
        self.ordered = 0;
        self.entries.iter_mut().for_each(|(m, r)| *r = f(*m));
    }

    /// The moves by descending [`Rating`].
    ///
    /// Each step selects the best of the remaining moves, so a search that cuts off early
    /// never pays for ordering the rest.
    #[inline(always)]
    pub fn sorted(&mut self) -> Sorted<'_> {
        Sorted {
            moves: self,
            next: 0,
        }
    }
}

impl FromIterator<Move> for Moves {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|m| (m, Rating::default()));
        Moves {
            entries: entries.collect(),
            ordered: 0,
        }
    }
}

/// The iterator returned by [`Moves::sorted`].
#[derive(Debug)]
pub struct Sorted<'a> {
    moves: &'a mut Moves,
    next: usize,
}

impl Iterator for Sorted<'_> {
    type Item = Move;

    #[inline(always)]
    fn next(&mut self) -> Option<Move> {
        let Moves { entries, ordered } = &mut *self.moves;
        let rest = entries.get_mut(self.next..).filter(|r| !r.is_empty())?;

        if self.next >= *ordered {
            let mut best = 0;
            for i in 1..rest.len() {
                if rest[i].1 > rest[best].1 {
                    best = i;
                }
            }

            rest.swap(0, best);
            *ordered = self.next + 1;
        }

        self.next += 1;
        Some(rest[0].0)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.moves.len() - self.next;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Sorted<'_> {}
