use crate::chess::{Bitboard, File, Rank};
use crate::util::Int;
use derive_more::with_trait::{Display, Error};
use std::fmt::{self, Formatter};
use std::{ops::Sub, str::FromStr};

/// One of the 64 squares, numbered rank by rank from `A1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

unsafe impl Int for Square {
    type Repr = i8;
    const MIN: Self::Repr = 0;
    const MAX: Self::Repr = 63;
}

impl Square {
    /// The square at the intersection of a file and a rank.
    #[inline(always)]
    pub fn new(f: File, r: Rank) -> Self {
        <Self as Int>::new(r.get() * 8 + f.get())
    }

    #[inline(always)]
    pub fn file(self) -> File {
        File::new(self.get() % 8)
    }

    #[inline(always)]
    pub fn rank(self) -> Rank {
        Rank::new(self.get() / 8)
    }

    /// The singleton set of this square.
    #[inline(always)]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(1u64 << self as u8)
    }
}

/// The signed index distance between two squares.
impl Sub for Square {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> i8 {
        self.get() - rhs.get()
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// The reason why parsing a [`Square`] failed.
#[derive(Debug, Display, Default, Clone, Eq, PartialEq, Error)]
#[display("failed to parse square")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (f, r) = s.split_at_checked(1).ok_or(ParseSquareError)?;
        let f = f.parse().map_err(|_| ParseSquareError)?;
        let r = r.parse().map_err(|_| ParseSquareError)?;
        Ok(Square::new(f, r))
    }
}
