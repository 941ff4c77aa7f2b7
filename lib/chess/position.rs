use crate::chess::*;
use crate::util::{Assume, Int};
use derive_more::with_trait::{Debug, Display, Error, From};
use std::fmt::{self, Formatter};
use std::str::FromStr;

#[cfg(test)]
use proptest::{prelude::*, sample::Selector};

/// The state needed to revert a move.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct Undo {
    m: Option<Move>,
    castles: Castles,
    en_passant: Option<Square>,
    halfmoves: u8,
    zobrist: Zobrist,
    slots: [u8; 2],
}

/// The current position on the chess board.
///
/// Moves are applied in place and reverted from an internal history.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[debug("Position({self})")]
pub struct Position {
    board: Board,
    zobrist: Zobrist,
    history: Vec<Undo>,
}

#[cfg(test)]
impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..256, any::<Selector>())
            .prop_map(|(moves, selector)| {
                let mut pos = Position::default();

                for _ in 0..moves {
                    if pos.outcome().is_none() {
                        pos.play(selector.select(pos.legal()));
                    } else {
                        break;
                    }
                }

                pos
            })
            .no_shrink()
            .boxed()
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        Position::new(Board::default())
    }
}

impl Position {
    #[inline(always)]
    fn new(board: Board) -> Self {
        Position {
            zobrist: board.zobrist(),
            history: Vec::with_capacity(256),
            board,
        }
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.board.turn
    }

    /// Half-moves since the last capture or pawn move.
    #[inline(always)]
    pub fn halfmoves(&self) -> u8 {
        self.board.halfmoves
    }

    #[inline(always)]
    pub fn fullmoves(&self) -> u32 {
        self.board.fullmoves
    }

    /// The square a pawn may capture onto en passant.
    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.board.en_passant
    }

    #[inline(always)]
    pub fn castles(&self) -> Castles {
        self.board.castles
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.board.occupied()
    }

    /// Every square holding a piece of `side`.
    #[inline(always)]
    pub fn material(&self, side: Color) -> Bitboard {
        self.board.by_color(side)
    }

    #[inline(always)]
    pub fn by_role(&self, role: Role) -> Bitboard {
        self.board.by_role(role)
    }

    #[inline(always)]
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.board.by_piece(piece)
    }

    /// Where the king of `side` stands, every legal position has one.
    #[track_caller]
    #[inline(always)]
    pub fn king(&self, side: Color) -> Square {
        self.board.king(side).assume()
    }

    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board.piece_on(sq)
    }

    /// Every piece with its square.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.board.iter()
    }

    /// The hash of this position, updated on every move.
    #[inline(always)]
    pub fn zobrist(&self) -> Zobrist {
        self.zobrist
    }

    /// How many moves, null moves included, can be undone.
    #[inline(always)]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// The move that led here, or `None` at the root or after a null move.
    #[inline(always)]
    pub fn last(&self) -> Option<Move> {
        self.history.last()?.m
    }

    /// Attackers of `sq` of either side, treating only `occupied` as blockers.
    #[inline(always)]
    pub fn attackers(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.board.attackers(sq, occupied)
    }

    #[inline(always)]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.board.is_attacked(sq, by)
    }

    /// Whether the king of the side to move is attacked.
    #[inline(always)]
    pub fn is_check(&self) -> bool {
        let turn = self.turn();
        self.is_attacked(self.king(turn), !turn)
    }

    /// Whether the side to move owns a knight, bishop, rook or queen.
    #[inline(always)]
    pub fn has_non_pawn_material(&self) -> bool {
        let pieces = self.by_role(Role::Pawn) | self.by_role(Role::King);
        !(self.material(self.turn()) & !pieces).is_empty()
    }

    /// Earlier occurrences of this position that are still reachable by the repetition rule.
    ///
    /// Only positions with the same side to move since the last capture, pawn move or null
    /// move are compared.
    #[inline(always)]
    pub fn repetitions(&self) -> usize {
        let reversible = self.history.iter().rev().take(self.halfmoves().into());
        let played = reversible.take_while(|u| u.m.is_some());
        let same_side = played.skip(1).step_by(2);
        same_side.filter(|u| u.zobrist == self.zobrist).count()
    }

    /// The third occurrence of the same position.
    #[inline(always)]
    pub fn is_draw_by_repetition(&self) -> bool {
        self.repetitions() >= 2
    }

    /// A hundred half-moves without a capture or pawn move.
    #[inline(always)]
    pub fn is_draw_by_50_move_rule(&self) -> bool {
        self.halfmoves() >= 100
    }

    /// Bare kings, or a lone minor piece against a bare king.
    #[inline(always)]
    pub fn is_material_insufficient(&self) -> bool {
        let minors = self.by_role(Role::Bishop) | self.by_role(Role::Knight);
        match self.occupied().len() {
            2 => true,
            3 => !minors.is_empty(),
            _ => false,
        }
    }

    /// Whether the position should be scored as a draw while searching.
    ///
    /// Unlike the game rules, a single repetition suffices.
    #[inline(always)]
    pub fn is_draw(&self) -> bool {
        self.is_draw_by_50_move_rule() || self.repetitions() > 0 || self.is_material_insufficient()
    }

    /// Plays a [`Move`] without checking whether it leaves the king in check.
    ///
    /// The move must have been generated for this position.
    #[track_caller]
    #[inline(always)]
    pub fn play(&mut self, m: Move) {
        let turn = self.turn();
        let (wc, wt, piece) = (m.whence(), m.whither(), m.piece());
        debug_assert_eq!(self.piece_on(wc), Some(piece));
        debug_assert_eq!(piece.color(), turn);

        let mut undo = self.snapshot(Some(m));
        self.clear_en_passant();

        if let Some(victim) = m.victim() {
            let target = m.target();
            let (captured, slot) = self.board.remove(target);
            debug_assert_eq!(captured, victim);
            self.zobrist ^= ZobristNumbers::psq(victim, target);
            undo.slots[0] = slot;
        }

        if let Some(role) = m.promotion() {
            let (_, slot) = self.board.remove(wc);
            let promoted = Piece::new(role, turn);
            self.board.put(promoted, wt);
            self.zobrist ^= ZobristNumbers::psq(piece, wc) ^ ZobristNumbers::psq(promoted, wt);
            undo.slots[1] = slot;
        } else {
            self.board.relocate(wc, wt);
            self.zobrist ^= ZobristNumbers::psq(piece, wc) ^ ZobristNumbers::psq(piece, wt);
        }

        match m.kind() {
            MoveKind::Castling => {
                let (rwc, rwt) = Castles::rook(wt).assume();
                let rook = Piece::new(Role::Rook, turn);
                self.board.relocate(rwc, rwt);
                self.zobrist ^= ZobristNumbers::psq(rook, rwc) ^ ZobristNumbers::psq(rook, rwt);
            }

            MoveKind::DoublePush => {
                let ep: Square = Int::new((wc.get() + wt.get()) / 2);
                self.board.en_passant = Some(ep);
                self.zobrist ^= ZobristNumbers::en_passant(ep.file());
            }

            _ => {}
        }

        let disrupted = Castles::from(wc) | Castles::from(wt);
        if self.board.castles & disrupted != Castles::none() {
            self.zobrist ^= ZobristNumbers::castling(self.board.castles);
            self.board.castles &= !disrupted;
            self.zobrist ^= ZobristNumbers::castling(self.board.castles);
        }

        if piece.role() == Role::Pawn || m.is_capture() {
            self.board.halfmoves = 0;
        } else {
            self.board.halfmoves = self.board.halfmoves.saturating_add(1);
        }

        if turn == Color::Black {
            self.board.fullmoves += 1;
        }

        self.board.turn = !turn;
        self.zobrist ^= ZobristNumbers::turn();
        self.history.push(undo);
    }

    /// Hands the turn to the opponent without moving, which is illegal while in check.
    #[inline(always)]
    pub fn pass(&mut self) {
        debug_assert!(!self.is_check());

        let undo = self.snapshot(None);
        self.history.push(undo);
        self.clear_en_passant();
        self.board.turn = !self.board.turn;
        self.zobrist ^= ZobristNumbers::turn();
    }

    #[inline(always)]
    fn snapshot(&self, m: Option<Move>) -> Undo {
        Undo {
            m,
            castles: self.board.castles,
            en_passant: self.board.en_passant,
            halfmoves: self.board.halfmoves,
            zobrist: self.zobrist,
            slots: [0; 2],
        }
    }

    #[inline(always)]
    fn clear_en_passant(&mut self) {
        if let Some(ep) = self.board.en_passant.take() {
            self.zobrist ^= ZobristNumbers::en_passant(ep.file());
        }
    }

    /// Takes back the last [`Position::play`] or [`Position::pass`], returning the move
    /// taken back if it was not a pass.
    ///
    /// # Panics
    ///
    /// Panics if the history is empty.
    #[track_caller]
    #[inline(always)]
    pub fn undo(&mut self) -> Option<Move> {
        let undo = self.history.pop().assume();
        let turn = !self.board.turn;
        self.board.turn = turn;

        if let Some(m) = undo.m {
            let (wc, wt) = (m.whence(), m.whither());

            if m.is_castling() {
                let (rwc, rwt) = Castles::rook(wt).assume();
                self.board.relocate(rwt, rwc);
            }

            if m.is_promotion() {
                self.board.remove(wt);
                self.board.restore(m.piece(), wc, undo.slots[1]);
            } else {
                self.board.relocate(wt, wc);
            }

            if let Some(victim) = m.victim() {
                self.board.restore(victim, m.target(), undo.slots[0]);
            }

            if turn == Color::Black {
                self.board.fullmoves -= 1;
            }
        }

        self.board.castles = undo.castles;
        self.board.en_passant = undo.en_passant;
        self.board.halfmoves = undo.halfmoves;
        self.zobrist = undo.zobrist;
        undo.m
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.board, f)
    }
}

/// Why a FEN string does not describe a playable position.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    #[display("malformed FEN: {_0}")]
    InvalidFen(ParseFenError),
    #[display("the position cannot arise in a game")]
    IllegalPosition,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use {ParsePositionError::*, Role::*};

        let mut board: Board = s.parse()?;

        for side in [Color::White, Color::Black] {
            if board.squares(Piece::new(King, side)).len() != 1 {
                return Err(IllegalPosition);
            }
        }

        let backranks = Rank::First.bitboard() | Rank::Eighth.bitboard();
        if !(board.by_role(Pawn) & backranks).is_empty() {
            return Err(IllegalPosition);
        }

        let theirs = board.king(!board.turn).assume();
        if board.is_attacked(theirs, board.turn) {
            return Err(IllegalPosition);
        }

        for side in [Color::White, Color::Black] {
            let king = Piece::new(King, side);
            let rook = Piece::new(Rook, side);
            for castling in Castles::squares(side) {
                let (rwc, _) = Castles::rook(castling).assume();
                let home = Castles::from(rwc);
                let kwc = Square::new(File::E, rwc.rank());
                if board.piece_on(kwc) != Some(king) || board.piece_on(rwc) != Some(rook) {
                    board.castles &= !home;
                }
            }
        }

        if let Some(ep) = board.en_passant {
            let victim = Piece::new(Pawn, !board.turn);
            let target = Square::new(ep.file(), Rank::Fifth.perspective(board.turn));
            if ep.rank() != Rank::Sixth.perspective(board.turn)
                || board.piece_on(target) != Some(victim)
            {
                board.en_passant = None;
            }
        }

        Ok(Position::new(board))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;
    use test_strategy::proptest;

    #[proptest]
    fn zobrist_hashes_the_board(pos: Position) {
        assert_eq!(pos.zobrist(), pos.board().zobrist());
    }

    #[proptest]
    fn king_is_found_where_it_stands(pos: Position, c: Color) {
        assert_eq!(pos.piece_on(pos.king(c)), Some(Piece::new(Role::King, c)));
    }

    #[proptest]
    fn material_of_both_sides_is_disjoint(pos: Position) {
        let white = pos.material(Color::White);
        let black = pos.material(Color::Black);
        assert_eq!(white & black, Bitboard::empty());
        assert_eq!(white | black, pos.occupied());
    }

    #[proptest]
    fn playing_then_undoing_restores_the_position(
        #[filter(#pos.outcome().is_none())] pos: Position,
        #[map(|s: Selector| s.select(#pos.legal()))] m: Move,
    ) {
        let mut next = pos.clone();
        next.play(m);
        assert_ne!(next.zobrist(), pos.zobrist());
        assert_eq!(next.undo(), Some(m));
        assert_eq!(next, pos);
    }

    #[proptest]
    fn playing_pseudo_legal_moves_then_undoing_restores_the_position(
        #[filter(#pos.outcome().is_none())] pos: Position,
    ) {
        let mut next = pos.clone();
        for m in pos.pseudo_legal() {
            next.play(m);
            assert_eq!(next.zobrist(), next.board().zobrist());
            next.undo();
            assert_eq!(next, pos);
        }
    }

    #[proptest]
    fn play_updates_the_hash_incrementally(
        #[filter(#pos.outcome().is_none())] mut pos: Position,
        #[map(|s: Selector| s.select(#pos.legal()))] m: Move,
    ) {
        pos.play(m);
        assert_eq!(pos.zobrist(), pos.board().zobrist());
    }

    #[proptest]
    fn play_moves_the_piece(
        #[filter(#pos.outcome().is_none())] mut pos: Position,
        #[map(|s: Selector| s.select(#pos.legal()))] m: Move,
    ) {
        let turn = pos.turn();
        pos.play(m);
        assert_eq!(pos.turn(), !turn);
        assert_eq!(pos.piece_on(m.whence()), None);

        let role = m.promotion().unwrap_or(m.piece().role());
        assert_eq!(pos.piece_on(m.whither()), Some(Piece::new(role, turn)));

        if m.is_en_passant() {
            assert_eq!(pos.piece_on(m.target()), None);
        }
    }

    #[proptest]
    fn pass_updates_position(#[filter(!#pos.is_check())] mut pos: Position) {
        let prev = pos.clone();
        pos.pass();
        assert_ne!(pos, prev);
        assert_eq!(pos.turn(), !prev.turn());
        assert_eq!(pos.zobrist(), pos.board().zobrist());
    }

    #[proptest]
    fn pass_is_reverted_by_undo(#[filter(!#pos.is_check())] mut pos: Position) {
        let prev = pos.clone();
        pos.pass();
        assert_eq!(pos.undo(), None);
        assert_eq!(pos, prev);
    }

    #[test]
    #[should_panic]
    fn undo_panics_without_history() {
        Position::default().undo();
    }

    #[test]
    fn shuffling_knights_repeats_the_position() {
        let mut pos = Position::default();
        for _ in 0..2 {
            for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                let m = pos.parse_move(uci).assume();
                pos.play(m);
            }
        }

        assert_eq!(pos.repetitions(), 2);
        assert!(pos.is_draw_by_repetition());
        assert!(pos.is_draw());
        assert_eq!(pos.outcome(), Some(Outcome::DrawByThreefoldRepetition));
    }

    #[test]
    fn double_push_sets_en_passant_square() {
        let mut pos = Position::default();
        let m = pos.parse_move("e2e4").assume();
        assert_eq!(m.kind(), MoveKind::DoublePush);
        pos.play(m);
        assert_eq!(pos.en_passant(), Some(Square::E3));
        pos.undo();
        assert_eq!(pos.en_passant(), None);
    }

    #[test]
    fn moving_the_king_disrupts_castling_rights() {
        let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().assume();
        let m = pos.parse_move("e1f1").assume();
        pos.play(m);
        assert_eq!(pos.castles().to_string(), "kq");
        assert_eq!(pos.zobrist(), pos.board().zobrist());
    }

    #[test]
    fn kings_alone_are_insufficient_material() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().assume();
        assert!(pos.is_material_insufficient());
        assert_eq!(pos.outcome(), Some(Outcome::DrawByInsufficientMaterial));
    }

    #[proptest]
    fn parsing_printed_position_is_an_identity(pos: Position) {
        let parsed: Position = pos.to_string().parse()?;
        assert_eq!(parsed.to_string(), pos.to_string());
        assert_eq!(parsed.zobrist(), pos.zobrist());

        for p in Piece::iter() {
            assert_eq!(parsed.by_piece(p), pos.by_piece(p));
        }

        for sq in Square::iter() {
            assert_eq!(parsed.piece_on(sq), pos.piece_on(sq));
        }
    }

    #[proptest]
    fn parsing_position_fails_for_invalid_board(#[filter(#s.parse::<Board>().is_err())] s: String) {
        assert_eq!(
            s.parse::<Position>().err(),
            s.parse::<Board>().err().map(ParsePositionError::InvalidFen)
        );
    }

    #[test]
    fn parsing_position_fails_without_kings() {
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1".parse::<Position>(),
            Err(ParsePositionError::IllegalPosition)
        );
    }

    #[test]
    fn parsing_position_fails_if_opponent_is_in_check() {
        assert_eq!(
            "4k3/4R3/8/8/8/8/8/4K3 w - - 0 1".parse::<Position>(),
            Err(ParsePositionError::IllegalPosition)
        );
    }

    #[test]
    fn parsing_position_drops_impossible_castling_rights() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K2R w KQkq - 0 1".parse().assume();
        assert_eq!(pos.castles().to_string(), "K");
    }

    #[test]
    fn parsing_position_drops_impossible_en_passant() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K3 w - e6 0 1".parse().assume();
        assert_eq!(pos.en_passant(), None);
    }
}
