use crate::chess::Bitboard;
use crate::util::Int;
use derive_more::with_trait::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::{ops::Sub, str::FromStr};

/// A column of the board, `a` through `h`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

const LETTERS: &[u8; 8] = b"abcdefgh";

impl File {
    /// The eight squares of this file.
    #[inline(always)]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(0x0101_0101_0101_0101 << self as u8)
    }
}

unsafe impl Int for File {
    type Repr = i8;
    const MIN: Self::Repr = File::A as _;
    const MAX: Self::Repr = File::H as _;
}

/// Signed distance in files.
impl Sub for File {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> i8 {
        self as i8 - rhs as i8
    }
}

impl Display for File {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(LETTERS[self.cast::<usize>()].into())
    }
}

#[derive(Debug, Display, Default, Clone, Eq, PartialEq, Error)]
#[display("expected a file between `a` and `h`")]
pub struct ParseFileError;

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [c] => LETTERS
                .iter()
                .position(|l| l == c)
                .and_then(Int::convert)
                .ok_or(ParseFileError),
            _ => Err(ParseFileError),
        }
    }
}
