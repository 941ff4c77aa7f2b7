use crate::chess::Move;
use arrayvec::ArrayVec;
use derive_more::with_trait::Debug;
use std::fmt::{self, Display, Formatter};

#[cfg(test)]
use proptest::{collection::vec, prelude::*};

/// A sequence of at most `N` [`Move`]s, such as a principal variation.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Line({self})")]
pub struct Line<const N: usize>(
    #[cfg_attr(test, strategy(vec(any::<Move>(), ..=N).prop_map(ArrayVec::from_iter)))]
    ArrayVec<Move, N>,
);

impl<const N: usize> Line<N> {
    #[inline(always)]
    pub const fn empty() -> Self {
        Line(ArrayVec::new_const())
    }

    /// A line of just `m`.
    #[inline(always)]
    pub fn singular(m: Move) -> Self {
        Line::cons(m, Line::empty())
    }

    /// Puts `head` in front of `tail`, dropping the last move if there is no room left.
    #[inline(always)]
    pub fn cons(head: Move, mut tail: Self) -> Self {
        if N == 0 {
            return tail;
        } else if tail.0.is_full() {
            tail.0.pop();
        }

        tail.0.insert(0, head);
        tail
    }

    #[inline(always)]
    pub fn head(&self) -> Option<Move> {
        self.0.first().copied()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline(always)]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Move> + '_ {
        self.0.iter().copied()
    }
}

impl<const N: usize> Display for Line<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, m) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }

            Display::fmt(&m, f)?;
        }

        Ok(())
    }
}
