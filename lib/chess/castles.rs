use crate::chess::{Color, Square};
use derive_more::with_trait::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Debug, Display, Error};
use std::fmt::{self, Formatter, Write};
use std::{ops::Not, str::FromStr};

/// The castling moves still available, one bit per king destination.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[derive(BitAnd, BitOr, BitAndAssign, BitOrAssign)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Castles({self})")]
pub struct Castles(#[cfg_attr(test, strategy(0u8..16))] u8);

// King destinations in FEN order, with the letter that grants each of them.
const RIGHTS: [(Square, char); 4] = [
    (Square::G1, 'K'),
    (Square::C1, 'Q'),
    (Square::G8, 'k'),
    (Square::C8, 'q'),
];

impl Castles {
    #[inline(always)]
    pub const fn none() -> Self {
        Castles(0)
    }

    #[inline(always)]
    pub const fn all() -> Self {
        Castles(0b1111)
    }

    /// The single right to castle onto `castling`, if it is a castling square.
    #[inline(always)]
    const fn right(castling: Square) -> Self {
        match castling {
            Square::G1 => Castles(0b0001),
            Square::C1 => Castles(0b0010),
            Square::G8 => Castles(0b0100),
            Square::C8 => Castles(0b1000),
            _ => Castles(0),
        }
    }

    /// Where the rook starts and lands when the king castles onto `castling`.
    #[inline(always)]
    pub const fn rook(castling: Square) -> Option<(Square, Square)> {
        match castling {
            Square::G1 => Some((Square::H1, Square::F1)),
            Square::C1 => Some((Square::A1, Square::D1)),
            Square::G8 => Some((Square::H8, Square::F8)),
            Square::C8 => Some((Square::A8, Square::D8)),
            _ => None,
        }
    }

    /// The king destinations of `side`, short castling first.
    #[inline(always)]
    pub const fn squares(side: Color) -> [Square; 2] {
        match side {
            Color::White => [Square::G1, Square::C1],
            Color::Black => [Square::G8, Square::C8],
        }
    }

    /// A number in `0..16` identifying this set of rights.
    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Whether the king may still castle onto `castling`.
    #[inline(always)]
    pub fn has(self, castling: Square) -> bool {
        self.0 & Castles::right(castling).0 != 0
    }
}

impl Default for Castles {
    #[inline(always)]
    fn default() -> Self {
        Castles::all()
    }
}

impl Not for Castles {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Castles(!self.0 & Castles::all().0)
    }
}

impl From<Square> for Castles {
    /// The rights lost once a piece leaves or lands on `sq`.
    #[inline(always)]
    fn from(sq: Square) -> Self {
        match sq {
            Square::E1 => Castles::right(Square::G1) | Castles::right(Square::C1),
            Square::H1 => Castles::right(Square::G1),
            Square::A1 => Castles::right(Square::C1),
            Square::E8 => Castles::right(Square::G8) | Castles::right(Square::C8),
            Square::H8 => Castles::right(Square::G8),
            Square::A8 => Castles::right(Square::C8),
            _ => Castles::none(),
        }
    }
}

impl Display for Castles {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (sq, c) in RIGHTS {
            if self.has(sq) {
                f.write_char(c)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Default, Clone, Eq, PartialEq, Error)]
#[display("failed to parse castling rights")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castles = Castles::none();

        for c in s.chars() {
            match RIGHTS.iter().find(|&&(_, r)| r == c) {
                Some(&(sq, _)) if !castles.has(sq) => castles |= Castles::right(sq),
                _ => return Err(ParseCastlesError),
            }
        }

        Ok(castles)
    }
}
