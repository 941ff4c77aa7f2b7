use crate::chess::{Bitboard, Color};
use crate::util::Int;
use derive_more::with_trait::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::{ops::Sub, str::FromStr};

/// A row of the board, counted from white's side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    /// The eight squares of this rank.
    #[inline(always)]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(0xFF << (8 * self as u8))
    }

    /// The rank that `side` calls by this name, so that the second rank of black is the seventh.
    #[inline(always)]
    pub fn perspective(self, side: Color) -> Self {
        match side {
            Color::White => self,
            Color::Black => Self::new(Self::MAX - self.get()),
        }
    }
}

unsafe impl Int for Rank {
    type Repr = i8;
    const MIN: Self::Repr = Rank::First as _;
    const MAX: Self::Repr = Rank::Eighth as _;
}

/// Signed distance in ranks.
impl Sub for Rank {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> i8 {
        self as i8 - rhs as i8
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&(self.get() + 1), f)
    }
}

#[derive(Debug, Display, Default, Clone, Eq, PartialEq, Error)]
#[display("expected a rank between `1` and `8`")]
pub struct ParseRankError;

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [c @ b'1'..=b'8'] => Ok(Rank::new((c - b'1') as i8)),
            _ => Err(ParseRankError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{File, Square};
    use test_strategy::proptest;

    #[test]
    fn optional_rank_is_a_single_byte() {
        assert_eq!(size_of::<Option<Rank>>(), 1);
    }

    #[test]
    fn pawns_start_on_each_sides_second_rank() {
        assert_eq!(Rank::Second.perspective(Color::White), Rank::Second);
        assert_eq!(Rank::Second.perspective(Color::Black), Rank::Seventh);
    }

    #[proptest]
    fn perspective_is_an_involution(r: Rank, c: Color) {
        assert_eq!(r.perspective(c).perspective(c), r);
    }

    #[proptest]
    fn bitboard_holds_one_square_per_file(r: Rank) {
        let bb = r.bitboard();
        assert_eq!(bb.len(), 8);
        assert!(File::iter().all(|f| bb.contains(Square::new(f, r))));
    }

    #[proptest]
    fn printed_rank_parses_back(r: Rank) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn digits_outside_1_to_8_are_rejected(#[filter(!('1'..='8').contains(&#c))] c: char) {
        assert_eq!(c.to_string().parse::<Rank>(), Err(ParseRankError));
    }

    #[proptest]
    fn only_single_digits_are_ranks(#[filter(#s.chars().count() != 1)] s: String) {
        assert_eq!(s.parse::<Rank>(), Err(ParseRankError));
    }
}
