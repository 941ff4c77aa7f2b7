use crate::chess::{Piece, Role, Square};
use std::fmt::{self, Debug, Display, Formatter, Write};

/// The special rule a [`Move`] follows, if any.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum MoveKind {
    Normal,
    DoublePush,
    EnPassant,
    Castling,
    Promotion(Role),
}

/// A chess move.
///
/// Besides the squares, a move carries the moving and captured pieces, so that it can be
/// applied and reverted without inspecting the board.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Move {
    whence: Square,
    whither: Square,
    piece: Piece,
    victim: Option<Piece>,
    kind: MoveKind,
}

impl Move {
    /// Constructs a move.
    #[inline(always)]
    pub const fn new(
        whence: Square,
        whither: Square,
        piece: Piece,
        victim: Option<Piece>,
        kind: MoveKind,
    ) -> Self {
        Move {
            whence,
            whither,
            piece,
            victim,
            kind,
        }
    }

    /// The source [`Square`].
    #[inline(always)]
    pub const fn whence(self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub const fn whither(self) -> Square {
        self.whither
    }

    /// The moving [`Piece`].
    #[inline(always)]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// The captured [`Piece`], if any.
    #[inline(always)]
    pub const fn victim(self) -> Option<Piece> {
        self.victim
    }

    /// The special rule this move follows.
    #[inline(always)]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// The promotion specifier.
    #[inline(always)]
    pub const fn promotion(self) -> Option<Role> {
        match self.kind {
            MoveKind::Promotion(r) => Some(r),
            _ => None,
        }
    }

    /// Whether this is a capture move.
    #[inline(always)]
    pub const fn is_capture(self) -> bool {
        self.victim.is_some()
    }

    /// Whether this is a promotion move.
    #[inline(always)]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveKind::Promotion(_))
    }

    /// Whether this is an en passant capture.
    #[inline(always)]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Whether this is a castling move.
    #[inline(always)]
    pub const fn is_castling(self) -> bool {
        matches!(self.kind, MoveKind::Castling)
    }

    /// Whether this move is neither a capture nor a promotion.
    #[inline(always)]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    /// Whether this move is not quiet.
    #[inline(always)]
    pub const fn is_noisy(self) -> bool {
        !self.is_quiet()
    }

    /// The square of the captured piece, which differs from the destination on en passant.
    #[inline(always)]
    pub fn target(self) -> Square {
        if self.is_en_passant() {
            Square::new(self.whither.file(), self.whence.rank())
        } else {
            self.whither
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)?;

        if self.is_capture() {
            f.write_char('x')?;
        }

        Ok(())
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.whence(), f)?;
        Display::fmt(&self.whither(), f)?;

        if let Some(r) = self.promotion() {
            Display::fmt(&r, f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn captures_are_noisy(m: Move) {
        assert!(!m.is_capture() || m.is_noisy());
    }

    #[proptest]
    fn promotions_are_noisy(m: Move) {
        assert!(!m.is_promotion() || m.is_noisy());
    }

    #[proptest]
    fn move_is_displayed_in_coordinate_notation(m: Move) {
        let s = m.to_string();
        assert_eq!(&s[..2], m.whence().to_string());
        assert_eq!(&s[2..4], m.whither().to_string());
        assert_eq!(s.len(), 4 + m.is_promotion() as usize);
    }

    #[test]
    fn en_passant_targets_the_square_behind_the_destination() {
        let m = Move::new(
            Square::E5,
            Square::D6,
            Piece::WhitePawn,
            Some(Piece::BlackPawn),
            MoveKind::EnPassant,
        );

        assert_eq!(m.target(), Square::D5);
    }

    #[test]
    fn promotion_is_displayed_with_lower_case_role() {
        let m = Move::new(
            Square::A7,
            Square::A8,
            Piece::WhitePawn,
            None,
            MoveKind::Promotion(Role::Queen),
        );

        assert_eq!(m.to_string(), "a7a8q");
    }
}
