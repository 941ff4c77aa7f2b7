use crate::chess::{AttackTables, Bitboard, Color, Rank, Role, Square};
use crate::util::Int;
use derive_more::with_trait::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A [`Role`] owned by one side, packed as `role << 1 | color`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Piece {
    WhitePawn,
    BlackPawn,
    WhiteKnight,
    BlackKnight,
    WhiteBishop,
    BlackBishop,
    WhiteRook,
    BlackRook,
    WhiteQueen,
    BlackQueen,
    WhiteKing,
    BlackKing,
}

impl Piece {
    #[inline(always)]
    pub fn new(r: Role, c: Color) -> Self {
        Int::new(r.get() << 1 | c.get())
    }

    #[inline(always)]
    pub fn role(&self) -> Role {
        Int::new(self.get() >> 1)
    }

    #[inline(always)]
    pub fn color(&self) -> Color {
        Int::new(self.get() & 1)
    }

    /// The squares this piece attacks from `wc`, sliding until the first piece in `occupied`.
    #[inline(always)]
    pub fn attacks(&self, wc: Square, occupied: Bitboard) -> Bitboard {
        let tables = AttackTables::get();
        match self.role() {
            Role::Pawn => tables.pawn(wc, self.color()),
            Role::Knight => tables.knight(wc),
            Role::King => tables.king(wc),
            Role::Bishop => tables.bishop(wc, occupied),
            Role::Rook => tables.rook(wc, occupied),
            Role::Queen => tables.bishop(wc, occupied) | tables.rook(wc, occupied),
        }
    }

    /// The squares this piece may move to from `wc`, excluding castling.
    ///
    /// Pawns only push here, their captures are the [attacks][`Piece::attacks`].
    #[inline(always)]
    pub fn moves(&self, wc: Square, ours: Bitboard, theirs: Bitboard) -> Bitboard {
        let occ = ours | theirs;
        if self.role() != Role::Pawn {
            self.attacks(wc, occ) & !ours
        } else {
            let empty = !occ;
            let color = self.color();
            let third = Rank::Third.perspective(color).bitboard();
            let push = |bb: Bitboard| match color {
                Color::White => Bitboard::new(bb.0 << 8),
                Color::Black => Bitboard::new(bb.0 >> 8),
            };

            let single = push(wc.bitboard()) & empty;
            single | (push(single & third) & empty)
        }
    }
}

unsafe impl Int for Piece {
    type Repr = u8;
    const MIN: Self::Repr = Piece::WhitePawn as _;
    const MAX: Self::Repr = Piece::BlackKing as _;
}

const SYMBOLS: &[u8; 12] = b"PpNnBbRrQqKk";

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(SYMBOLS[self.cast::<usize>()].into())
    }
}

#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("expected one of `PNBRQK` or `pnbrqk`")]
pub struct ParsePieceError;

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [c] => SYMBOLS
                .iter()
                .position(|p| p == c)
                .and_then(Int::convert)
                .ok_or(ParsePieceError),
            _ => Err(ParsePieceError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn optional_piece_is_a_single_byte() {
        assert_eq!(size_of::<Option<Piece>>(), 1);
    }

    #[proptest]
    fn piece_unpacks_into_its_role_and_color(r: Role, c: Color) {
        let p = Piece::new(r, c);
        assert_eq!((p.role(), p.color()), (r, c));
    }

    #[proptest]
    fn pieces_never_reach_their_own_square(p: Piece, wc: Square, a: Bitboard, b: Bitboard) {
        assert!(!p.attacks(wc, a | b).contains(wc));
        assert!(!p.moves(wc, a, b).contains(wc));
    }

    #[proptest]
    fn moves_never_land_on_own_pieces(p: Piece, wc: Square, a: Bitboard, b: Bitboard) {
        let ours = a & !b;
        assert!((p.moves(wc, ours, b) & ours).is_empty());
    }

    #[proptest]
    fn queen_attacks_like_rook_and_bishop_combined(c: Color, wc: Square, occ: Bitboard) {
        let attacks = |r| Piece::new(r, c).attacks(wc, occ);
        let sliders = attacks(Role::Rook) | attacks(Role::Bishop);
        assert_eq!(attacks(Role::Queen), sliders);
    }

    #[test]
    fn pawn_can_double_push_from_its_second_rank() {
        let empty = Bitboard::empty();
        let moves = Piece::WhitePawn.moves(Square::E2, empty, empty);
        assert_eq!(moves, Square::E3.bitboard() | Square::E4.bitboard());

        let moves = Piece::BlackPawn.moves(Square::D7, empty, empty);
        assert_eq!(moves, Square::D6.bitboard() | Square::D5.bitboard());
    }

    #[test]
    fn blocked_pawn_cannot_push() {
        let theirs = Square::E3.bitboard();
        let moves = Piece::WhitePawn.moves(Square::E2, Bitboard::empty(), theirs);
        assert!(moves.is_empty());

        let moves = Piece::WhitePawn.moves(Square::E2, Square::E4.bitboard(), theirs);
        assert!(moves.is_empty());
    }

    #[test]
    fn white_pieces_print_in_upper_case() {
        assert_eq!(Piece::WhiteKnight.to_string(), "N");
        assert_eq!(Piece::BlackQueen.to_string(), "q");
    }

    #[proptest]
    fn printed_piece_parses_back(p: Piece) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }

    #[proptest]
    fn unknown_letters_are_rejected(
        #[filter(!"pnbrqk".contains(#c.to_ascii_lowercase()))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<Piece>(), Err(ParsePieceError));
    }

    #[proptest]
    fn only_single_letters_are_pieces(#[filter(#s.chars().count() != 1)] s: String) {
        assert_eq!(s.parse::<Piece>(), Err(ParsePieceError));
    }
}
