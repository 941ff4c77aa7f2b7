use crate::chess::*;
use crate::util::{Assume, Int};
use arrayvec::ArrayVec;
use derive_more::with_trait::{Debug, Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// The maximum number of pieces of a kind that may be on the board.
const CAPACITY: usize = 10;

/// The chess board.
///
/// Besides the bitboards and the mailbox, every [`Piece`] keeps a dense list of the squares
/// it occupies, along with each square's slot in that list.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[debug("Board({self})")]
pub struct Board {
    pieces: [Bitboard; 12],
    colors: [Bitboard; 2],
    occupied: Bitboard,
    mailbox: [Option<Piece>; 64],
    lists: [ArrayVec<Square, CAPACITY>; 12],
    slots: [u8; 64],
    pub turn: Color,
    pub castles: Castles,
    pub en_passant: Option<Square>,
    pub halfmoves: u8,
    pub fullmoves: u32,
}

impl Default for Board {
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let rear = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let (white, black) = (Color::White, Color::Black);
        for (file, role) in File::iter().zip(rear) {
            board.put(Piece::new(role, white), Square::new(file, Rank::First));
            board.put(Piece::new(Pawn, white), Square::new(file, Rank::Second));
            board.put(Piece::new(Pawn, black), Square::new(file, Rank::Seventh));
            board.put(Piece::new(role, black), Square::new(file, Rank::Eighth));
        }

        board.castles = Castles::all();
        board
    }
}

impl Board {
    /// A board without pieces.
    #[inline(always)]
    pub fn empty() -> Self {
        Board {
            pieces: [Bitboard::empty(); 12],
            colors: [Bitboard::empty(); 2],
            occupied: Bitboard::empty(),
            mailbox: [None; 64],
            lists: Default::default(),
            slots: [0; 64],
            turn: Color::White,
            castles: Castles::none(),
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// [`Square`]s occupied.
    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// [`Square`]s occupied by [`Piece`]s of a [`Color`].
    #[inline(always)]
    pub fn by_color(&self, c: Color) -> Bitboard {
        self.colors[c as usize]
    }

    /// [`Square`]s occupied by [`Piece`]s of a [`Role`].
    #[inline(always)]
    pub fn by_role(&self, r: Role) -> Bitboard {
        self.by_piece(Piece::new(r, Color::White)) | self.by_piece(Piece::new(r, Color::Black))
    }

    /// [`Square`]s occupied by a [`Piece`].
    #[inline(always)]
    pub fn by_piece(&self, p: Piece) -> Bitboard {
        self.pieces[p as usize]
    }

    /// The [`Square`]s occupied by a [`Piece`] as a dense list.
    #[inline(always)]
    pub fn squares(&self, p: Piece) -> &[Square] {
        &self.lists[p as usize]
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.mailbox[sq as usize]
    }

    /// [`Square`] occupied by a the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        self.squares(Piece::new(Role::King, side)).first().copied()
    }

    /// An iterator over all pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Piece::iter().flat_map(|p| {
            let squares = self.squares(p).iter();
            squares.map(move |&sq| (p, sq))
        })
    }

    /// Pieces of both colors attacking a [`Square`] given an occupancy.
    ///
    /// Pieces outside of `occupied` are ignored, which uncovers x-rays behind them.
    #[inline(always)]
    pub fn attackers(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let tables = AttackTables::get();
        let queens = self.by_role(Role::Queen);

        let white = tables.pawn(sq, Color::Black) & self.by_piece(Piece::WhitePawn);
        let black = tables.pawn(sq, Color::White) & self.by_piece(Piece::BlackPawn);
        let pawns = white | black;
        let knights = tables.knight(sq) & self.by_role(Role::Knight);
        let kings = tables.king(sq) & self.by_role(Role::King);
        let diagonal = tables.bishop(sq, occupied) & (self.by_role(Role::Bishop) | queens);
        let straight = tables.rook(sq, occupied) & (self.by_role(Role::Rook) | queens);

        (pawns | knights | kings | diagonal | straight) & occupied
    }

    /// Whether a [`Square`] is attacked by [`Piece`]s of a [`Color`].
    #[inline(always)]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        !(self.attackers(sq, self.occupied) & self.by_color(by)).is_empty()
    }

    /// Computes the [zobrist hash](`Zobrist`) from scratch.
    #[inline(always)]
    pub fn zobrist(&self) -> Zobrist {
        let mut zobrist = ZobristNumbers::castling(self.castles);

        if self.turn == Color::Black {
            zobrist ^= ZobristNumbers::turn();
        }

        if let Some(ep) = self.en_passant {
            zobrist ^= ZobristNumbers::en_passant(ep.file());
        }

        for (p, sq) in self.iter() {
            zobrist ^= ZobristNumbers::psq(p, sq);
        }

        zobrist
    }

    /// Places a piece on an empty square.
    #[track_caller]
    #[inline(always)]
    pub fn put(&mut self, p: Piece, sq: Square) {
        debug_assert!(self.piece_on(sq).is_none());
        let list = &mut self.lists[p as usize];
        self.slots[sq as usize] = list.len() as u8;
        list.try_push(sq).is_ok().assume();
        self.mailbox[sq as usize] = Some(p);
        self.toggle(p, sq);
    }

    /// Removes the piece on a square, returning it along with the slot it occupied.
    #[track_caller]
    #[inline(always)]
    pub fn remove(&mut self, sq: Square) -> (Piece, u8) {
        let p = self.mailbox[sq as usize].take().assume();
        let slot = std::mem::take(&mut self.slots[sq as usize]);
        let list = &mut self.lists[p as usize];
        list.swap_remove(slot as usize);
        if let Some(&moved) = list.get(slot as usize) {
            self.slots[moved as usize] = slot;
        }

        self.toggle(p, sq);
        (p, slot)
    }

    /// Exactly reverts [`Board::remove`], including the order of the piece list.
    #[track_caller]
    #[inline(always)]
    pub fn restore(&mut self, p: Piece, sq: Square, slot: u8) {
        debug_assert!(self.piece_on(sq).is_none());
        let list = &mut self.lists[p as usize];
        let last = list.len();
        list.try_push(sq).is_ok().assume();
        list.swap(slot as usize, last);
        self.slots[list[last] as usize] = last as u8;
        self.slots[sq as usize] = slot;
        self.mailbox[sq as usize] = Some(p);
        self.toggle(p, sq);
    }

    /// Moves the piece on a square to an empty square, keeping its slot.
    #[track_caller]
    #[inline(always)]
    pub fn relocate(&mut self, whence: Square, whither: Square) {
        debug_assert!(self.piece_on(whither).is_none());
        let p = self.mailbox[whence as usize].take().assume();
        let slot = std::mem::take(&mut self.slots[whence as usize]);
        self.lists[p as usize][slot as usize] = whither;
        self.slots[whither as usize] = slot;
        self.mailbox[whither as usize] = Some(p);
        self.toggle(p, whence);
        self.toggle(p, whither);
    }

    #[inline(always)]
    fn toggle(&mut self, p: Piece, sq: Square) {
        let bit = sq.bitboard();
        self.pieces[p as usize] ^= bit;
        self.colors[p.color() as usize] ^= bit;
        self.occupied ^= bit;
    }
}

impl Board {
    /// Fills an empty board from the first FEN field.
    fn place(&mut self, placement: &str) -> Result<(), ParseFenError> {
        use ParseFenError::InvalidPlacement;

        let rows = Vec::from_iter(placement.split('/'));
        if rows.len() != 8 {
            return Err(InvalidPlacement);
        }

        for (rank, row) in Rank::iter().rev().zip(rows) {
            let mut files = File::iter();
            for c in row.chars() {
                if let '1'..='8' = c {
                    for _ in b'1'..=c as u8 {
                        files.next().ok_or(InvalidPlacement)?;
                    }
                } else {
                    let Ok(p) = c.encode_utf8(&mut [0; 4]).parse::<Piece>() else {
                        return Err(InvalidPlacement);
                    };

                    let file = files.next().ok_or(InvalidPlacement)?;
                    if self.squares(p).len() == CAPACITY {
                        return Err(InvalidPlacement);
                    }

                    self.put(p, Square::new(file, rank));
                }
            }

            if files.next().is_some() {
                return Err(InvalidPlacement);
            }
        }

        Ok(())
    }
}

/// Prints the board in [FEN](https://www.chessprogramming.org/Forsyth-Edwards_Notation).
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, rank) in Rank::iter().rev().enumerate() {
            if i > 0 {
                f.write_char('/')?;
            }

            let mut gap = 0;
            for file in File::iter() {
                let Some(p) = self.piece_on(Square::new(file, rank)) else {
                    gap += 1;
                    continue;
                };

                if gap > 0 {
                    write!(f, "{gap}")?;
                    gap = 0;
                }

                write!(f, "{p}")?;
            }

            if gap > 0 {
                write!(f, "{gap}")?;
            }
        }

        write!(f, " {} ", self.turn)?;

        match self.castles {
            c if c == Castles::none() => f.write_char('-')?,
            c => write!(f, "{c}")?,
        }

        match self.en_passant {
            None => f.write_str(" - ")?,
            Some(ep) => write!(f, " {ep} ")?,
        }

        write!(f, "{} {}", self.halfmoves, self.fullmoves)
    }
}

/// The FEN field that could not be parsed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[display("invalid piece placement")]
    InvalidPlacement,
    #[display("side to move must be `w` or `b`")]
    InvalidSideToMove,
    #[display("invalid castling rights")]
    InvalidCastlingRights,
    #[display("invalid en passant square")]
    InvalidEnPassantSquare,
    #[display("invalid halfmove clock")]
    InvalidHalfmoveClock,
    #[display("invalid fullmove number")]
    InvalidFullmoveNumber,
    #[display("trailing input after the fullmove number")]
    InvalidSyntax,
}

impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ParseFenError::*;

        let mut fields = s.split_ascii_whitespace();
        let mut next = |e: ParseFenError| fields.next().ok_or(e);

        let mut board = Board::empty();
        board.place(next(InvalidPlacement)?)?;

        board.turn = match next(InvalidSideToMove)? {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(InvalidSideToMove),
        };

        board.castles = match next(InvalidCastlingRights)? {
            "-" => Castles::none(),
            c => c.parse().or(Err(InvalidCastlingRights))?,
        };

        board.en_passant = match next(InvalidEnPassantSquare)? {
            "-" => None,
            ep => Some(ep.parse().or(Err(InvalidEnPassantSquare))?),
        };

        let halfmoves = next(InvalidHalfmoveClock)?;
        board.halfmoves = halfmoves.parse().or(Err(InvalidHalfmoveClock))?;
        let fullmoves = next(InvalidFullmoveNumber)?;
        board.fullmoves = fullmoves.parse().or(Err(InvalidFullmoveNumber))?;

        match fields.next() {
            None => Ok(board),
            Some(_) => Err(InvalidSyntax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;
    use test_strategy::proptest;

    #[test]
    fn default_board_is_the_starting_position() {
        assert_eq!(
            Board::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[proptest]
    fn iter_returns_pieces_and_squares(pos: Position) {
        let b = pos.board();
        for (p, sq) in b.iter() {
            assert_eq!(b.piece_on(sq), Some(p));
        }
    }

    #[proptest]
    fn piece_lists_mirror_bitboards(pos: Position, p: Piece) {
        let b = pos.board();
        let list = b.squares(p).iter().fold(Bitboard::empty(), |bb, &sq| bb.with(sq));
        assert_eq!(list, b.by_piece(p));
        assert_eq!(b.squares(p).len(), b.by_piece(p).len());
    }

    #[proptest]
    fn by_color_returns_squares_occupied_by_pieces_of_a_color(pos: Position, c: Color) {
        for sq in pos.board().by_color(c) {
            assert_eq!(pos.board().piece_on(sq).map(|p| p.color()), Some(c));
        }
    }

    #[proptest]
    fn by_role_returns_squares_occupied_by_pieces_of_a_role(pos: Position, r: Role) {
        for sq in pos.board().by_role(r) {
            assert_eq!(pos.board().piece_on(sq).map(|p| p.role()), Some(r));
        }
    }

    #[proptest]
    fn occupied_is_the_union_of_colors(pos: Position) {
        let b = pos.board();
        let (white, black) = (b.by_color(Color::White), b.by_color(Color::Black));
        assert_eq!(b.occupied(), white | black);
    }

    #[proptest]
    fn removing_then_restoring_preserves_the_board(
        pos: Position,
        #[filter(#pos.board().piece_on(#sq).is_some())] sq: Square,
    ) {
        let mut b = pos.board().clone();
        let (p, slot) = b.remove(sq);
        assert_eq!(b.piece_on(sq), None);
        b.restore(p, sq, slot);
        assert_eq!(&b, pos.board());
    }

    #[proptest]
    fn relocating_moves_the_piece(
        pos: Position,
        #[filter(#pos.board().piece_on(#wc).is_some())] wc: Square,
        #[filter(#pos.board().piece_on(#wt).is_none())] wt: Square,
    ) {
        let mut b = pos.board().clone();
        let p = b.piece_on(wc);
        b.relocate(wc, wt);
        assert_eq!(b.piece_on(wc), None);
        assert_eq!(b.piece_on(wt), p);
        b.relocate(wt, wc);
        assert_eq!(&b, pos.board());
    }

    #[proptest]
    fn parsing_printed_board_is_an_identity(pos: Position) {
        let b = pos.board();
        let fen = b.to_string();
        assert_eq!(fen.parse::<Board>().map(|b| b.to_string()), Ok(fen));
    }

    #[proptest]
    fn parsing_board_fails_for_invalid_fen(
        pos: Position,
        #[strategy(..=#pos.to_string().len())] n: usize,
        #[strategy("[^[:ascii:]]+")] r: String,
    ) {
        let s = pos.to_string();
        assert_eq!([&s[..n], &r, &s[n..]].concat().parse().ok(), None::<Board>);
    }

    #[test]
    fn parsing_board_fails_for_too_many_pieces() {
        let fen = "QQQQQQQQ/QQQQ4/8/8/8/8/8/K6k w - - 0 1";
        assert_eq!(fen.parse::<Board>(), Err(ParseFenError::InvalidPlacement));
    }

    #[test]
    fn parsing_board_reports_the_failing_field() {
        use ParseFenError::*;

        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
        let parse = |rest: &str| format!("{start} {rest}").parse::<Board>();
        assert_eq!(parse("x KQkq - 0 1"), Err(InvalidSideToMove));
        assert_eq!(parse("w KX - 0 1"), Err(InvalidCastlingRights));
        assert_eq!(parse("w - e9 0 1"), Err(InvalidEnPassantSquare));
        assert_eq!(parse("w - - x 1"), Err(InvalidHalfmoveClock));
        assert_eq!(parse("w - -"), Err(InvalidHalfmoveClock));
        assert_eq!(parse("w - - 0 1 x"), Err(InvalidSyntax));
    }

    #[test]
    fn parsing_board_fails_for_short_rank() {
        let fen = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(fen.parse::<Board>(), Err(ParseFenError::InvalidPlacement));
    }
}
