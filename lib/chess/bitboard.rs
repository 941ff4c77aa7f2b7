use crate::chess::{File, Rank, Square};
use crate::util::{Assume, Int};
use derive_more::with_trait::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Debug, Deref, Not,
};
use std::fmt::{self, Formatter, Write};

/// A set of [`Square`]s packed into 64 bits, with `A1` as the least significant bit.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Deref,
    Not,
    BitAnd,
    BitOr,
    BitXor,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Wraps raw bits.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// No squares.
    #[inline(always)]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// Every square.
    #[inline(always)]
    pub const fn full() -> Self {
        Bitboard(u64::MAX)
    }

    /// The squares reached by repeatedly stepping from `origin` by each `(file, rank)` offset.
    ///
    /// Each walk includes the first occupied square it meets and ends there, or at the edge of
    /// the board. The origin itself is part of the result.
    ///
    /// ```
    /// # use flint::chess::*;
    /// let ray = Bitboard::walk(Square::B2, &[(1, 1)], Square::E5.bitboard());
    /// assert_eq!(Vec::from_iter(ray), [Square::B2, Square::C3, Square::D4, Square::E5]);
    /// ```
    pub fn walk(origin: Square, steps: &[(i8, i8)], occupied: Bitboard) -> Self {
        let mut reached = origin.bitboard();

        for &(df, dr) in steps {
            let (mut file, mut rank) = (origin.file().get(), origin.rank().get());
            loop {
                (file, rank) = (file + df, rank + dr);
                let (Some(f), Some(r)) = (file.convert::<File>(), rank.convert::<Rank>()) else {
                    break;
                };

                let sq = Square::new(f, r);
                reached = reached.with(sq);
                if occupied.contains(sq) {
                    break;
                }
            }
        }

        reached
    }

    /// How many squares are in the set.
    #[inline(always)]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set has no squares.
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `sq` is in the set.
    #[inline(always)]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & sq.bitboard().0 != 0
    }

    /// This set plus `sq`.
    #[inline(always)]
    pub fn with(self, sq: Square) -> Self {
        self | sq.bitboard()
    }

    /// This set minus `sq`.
    #[inline(always)]
    pub fn without(self, sq: Square) -> Self {
        self & !sq.bitboard()
    }

    /// The square with the lowest index, if any.
    #[inline(always)]
    pub fn first(self) -> Option<Square> {
        match self.0 {
            0 => None,
            bits => Some(bits.trailing_zeros().convert().assume()),
        }
    }

    /// The squares in the set, from `A1` towards `H8`.
    #[inline(always)]
    pub fn iter(self) -> impl ExactSizeIterator<Item = Square> {
        self.into_iter()
    }

    /// Every subset of this set, starting with the empty one.
    ///
    /// Enumerated with the [Carry-Rippler] trick.
    ///
    /// [Carry-Rippler]: https://www.chessprogramming.org/Traversing_Subsets_of_a_Set
    pub fn subsets(self) -> impl Iterator<Item = Bitboard> {
        let mask = self.0;
        let mut next = Some(0u64);
        std::iter::from_fn(move || {
            let subset = next?;
            next = Some(subset.wrapping_sub(mask) & mask).filter(|&s| s != 0);
            Some(Bitboard(subset))
        })
    }
}

impl Debug for Bitboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            f.write_char('\n')?;
            for file in File::iter() {
                let bit = self.contains(Square::new(file, rank));
                f.write_char(if bit { 'x' } else { '.' })?;
            }
        }

        Ok(())
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        sq.bitboard()
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Members;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        Members(self.0)
    }
}

/// Drains a [`Bitboard`] lowest square first.
#[derive(Debug, Clone)]
pub struct Members(u64);

impl Iterator for Members {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Square> {
        let sq = Bitboard(self.0).first()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Members {}
