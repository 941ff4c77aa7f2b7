use crate::chess::*;
use crate::util::{Assume, Int};
use arrayvec::ArrayVec;
use derive_more::with_trait::{Display, Error};

/// A container with sufficient capacity to hold all [`Move`]s in any [`Position`].
pub type MoveList = ArrayVec<Move, 256>;

/// The reason why parsing a [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("`{_0}` is not a legal move in this position")]
pub struct ParseMoveError(#[error(not(source))] String);

impl Position {
    /// All moves that follow the piece movement rules, including those that leave the king in check.
    #[inline(always)]
    pub fn pseudo_legal(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate(false, &mut moves);
        moves
    }

    /// The subset of [pseudo legal](`Position::pseudo_legal`) moves that capture a piece.
    #[inline(always)]
    pub fn captures(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate(true, &mut moves);
        moves
    }

    /// Whether a pseudo legal [`Move`] leaves the king out of check.
    #[inline(always)]
    pub fn is_legal(&self, m: Move) -> bool {
        use Role::*;

        if m.is_castling() {
            return true;
        }

        let turn = self.turn();
        let king = match m.piece().role() {
            King => m.whither(),
            _ => self.king(turn),
        };

        let mut occupied = self.occupied().without(m.whence()).with(m.whither());
        let mut theirs = self.material(!turn);
        if m.is_capture() {
            let target = m.target();
            theirs = theirs.without(target);
            if target != m.whither() {
                occupied = occupied.without(target);
            }
        }

        (self.attackers(king, occupied) & theirs).is_empty()
    }

    /// Plays a pseudo legal [`Move`] if it's legal.
    ///
    /// Returns whether the move was played.
    #[inline(always)]
    pub fn play_legal(&mut self, m: Move) -> bool {
        let legal = self.is_legal(m);
        if legal {
            self.play(m);
        }

        legal
    }

    /// The legal moves that can be played in this position.
    #[inline(always)]
    pub fn legal(&self) -> MoveList {
        let mut moves = self.pseudo_legal();
        moves.retain(|m| self.is_legal(*m));
        moves
    }

    /// Whether the side to move has any legal move.
    #[inline(always)]
    pub fn has_legal_move(&self) -> bool {
        self.pseudo_legal().into_iter().any(|m| self.is_legal(m))
    }

    /// Whether this position is a [checkmate].
    ///
    /// [checkmate]: https://www.chessprogramming.org/Checkmate
    #[inline(always)]
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    /// Whether this position is a [stalemate].
    ///
    /// [stalemate]: https://www.chessprogramming.org/Stalemate
    #[inline(always)]
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    /// The [`Outcome`] of the game in case this position is final.
    #[inline(always)]
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.has_legal_move() {
            if self.is_check() {
                Some(Outcome::Checkmate(!self.turn()))
            } else {
                Some(Outcome::Stalemate)
            }
        } else if self.is_draw_by_50_move_rule() {
            Some(Outcome::DrawBy50MoveRule)
        } else if self.is_draw_by_repetition() {
            Some(Outcome::DrawByThreefoldRepetition)
        } else if self.is_material_insufficient() {
            Some(Outcome::DrawByInsufficientMaterial)
        } else {
            None
        }
    }

    /// Finds the legal [`Move`] in coordinate notation, e.g. `e2e4` or `a7a8q`.
    pub fn parse_move(&self, s: &str) -> Result<Move, ParseMoveError> {
        self.legal()
            .into_iter()
            .find(|m| m.to_string() == s)
            .ok_or_else(|| ParseMoveError(s.to_string()))
    }

    /// Counts the total number of reachable positions to the given depth.
    pub fn perft(&self, depth: u8) -> usize {
        self.clone().count(depth)
    }

    /// Counts the reachable positions to the given depth under each legal move.
    pub fn divide(&self, depth: u8) -> Vec<(Move, usize)> {
        let mut pos = self.clone();
        let mut counts = Vec::new();
        for m in self.legal() {
            pos.play(m);
            counts.push((m, pos.count(depth.saturating_sub(1))));
            pos.undo();
        }

        counts
    }

    fn count(&mut self, depth: u8) -> usize {
        match depth {
            0 => 1,
            1 => self.legal().len(),
            _ => {
                let mut nodes = 0;
                for m in self.pseudo_legal() {
                    if self.play_legal(m) {
                        nodes += self.count(depth - 1);
                        self.undo();
                    }
                }

                nodes
            }
        }
    }

    fn generate(&self, captures_only: bool, moves: &mut MoveList) {
        use {MoveKind::*, Role::*};

        let turn = self.turn();
        let ours = self.material(turn);
        let theirs = self.material(!turn);
        let occupied = ours | theirs;
        let last = Rank::Eighth.perspective(turn);

        for role in Role::iter() {
            let piece = Piece::new(role, turn);
            for &wc in self.board().squares(piece) {
                if role != Pawn {
                    let mut targets = piece.moves(wc, ours, theirs);
                    if captures_only {
                        targets &= theirs;
                    }

                    for wt in targets {
                        moves.push(Move::new(wc, wt, piece, self.piece_on(wt), Normal));
                    }

                    continue;
                }

                let attacks = piece.attacks(wc, occupied);
                let mut targets = attacks & theirs;
                if !captures_only {
                    targets |= piece.moves(wc, ours, theirs);
                }

                for wt in targets {
                    let victim = self.piece_on(wt);
                    if wt.rank() == last {
                        for r in [Queen, Rook, Bishop, Knight] {
                            moves.push(Move::new(wc, wt, piece, victim, Promotion(r)));
                        }
                    } else if (wt - wc).abs() == 16 {
                        moves.push(Move::new(wc, wt, piece, None, DoublePush));
                    } else {
                        moves.push(Move::new(wc, wt, piece, victim, Normal));
                    }
                }

                if let Some(ep) = self.en_passant() {
                    if attacks.contains(ep) {
                        let victim = Some(Piece::new(Pawn, !turn));
                        moves.push(Move::new(wc, ep, piece, victim, EnPassant));
                    }
                }
            }
        }

        if !captures_only {
            self.castlings(moves);
        }
    }

    fn castlings(&self, moves: &mut MoveList) {
        let turn = self.turn();
        let king = Piece::new(Role::King, turn);
        let wc = self.king(turn);

        for wt in Castles::squares(turn) {
            if !self.castles().has(wt) {
                continue;
            }

            let (rwc, _) = Castles::rook(wt).assume();
            let toward = |sq: Square| [((sq.file() - wc.file()).signum(), 0)];
            let path = Bitboard::walk(wc, &toward(rwc), rwc.bitboard());
            if path.without(wc).without(rwc) & self.occupied() != Bitboard::empty() {
                continue;
            }

            let transit = Bitboard::walk(wc, &toward(wt), wt.bitboard());
            if transit.iter().any(|sq| self.is_attacked(sq, !turn)) {
                continue;
            }

            moves.push(Move::new(wc, wt, king, None, MoveKind::Castling));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::sample::Selector;
    use std::collections::HashSet;
    use test_strategy::proptest;

    #[test]
    fn starting_position_has_twenty_moves() {
        let pos = Position::default();
        assert_eq!(pos.pseudo_legal().len(), 20);
        assert_eq!(pos.legal().len(), 20);
        assert!(pos.captures().is_empty());
    }

    #[test]
    fn perft_from_starting_position() {
        let pos = Position::default();
        assert_eq!(pos.perft(0), 1);
        assert_eq!(pos.perft(1), 20);
        assert_eq!(pos.perft(2), 400);
        assert_eq!(pos.perft(3), 8902);
    }

    #[test]
    fn divide_sums_to_perft() {
        let pos = Position::default();
        let total: usize = pos.divide(3).into_iter().map(|(_, n)| n).sum();
        assert_eq!(total, pos.perft(3));
    }

    #[proptest]
    fn legal_moves_never_leave_the_king_in_check(
        #[filter(#pos.outcome().is_none())] mut pos: Position,
    ) {
        let turn = pos.turn();
        for m in pos.legal() {
            pos.play(m);
            assert!(!pos.is_attacked(pos.king(turn), !turn));
            pos.undo();
        }
    }

    #[proptest]
    fn is_legal_agrees_with_playing_the_move(mut pos: Position) {
        let turn = pos.turn();
        for m in pos.pseudo_legal() {
            let legal = pos.is_legal(m);
            pos.play(m);
            assert_eq!(legal, !pos.is_attacked(pos.king(turn), !turn));
            pos.undo();
        }
    }

    #[proptest]
    fn play_legal_only_plays_legal_moves(
        mut pos: Position,
        #[map(|s: Selector| s.select(#pos.pseudo_legal()))] m: Move,
    ) {
        let prev = pos.clone();
        if pos.play_legal(m) {
            assert!(prev.is_legal(m));
            assert_eq!(pos.undo(), Some(m));
        }

        assert_eq!(pos, prev);
    }

    #[proptest]
    fn captures_are_the_pseudo_legal_moves_with_victims(pos: Position) {
        let captures = HashSet::<Move>::from_iter(pos.captures());
        let moves = pos.pseudo_legal().into_iter();
        let expected = HashSet::from_iter(moves.filter(|m| m.is_capture()));
        assert_eq!(captures, expected);
    }

    #[proptest]
    fn generated_moves_are_unique(pos: Position) {
        let moves = pos.pseudo_legal();
        assert_eq!(HashSet::<Move>::from_iter(moves.clone()).len(), moves.len());
    }

    #[proptest]
    fn moves_are_played_by_the_side_to_move(pos: Position) {
        for m in pos.pseudo_legal() {
            assert_eq!(m.piece().color(), pos.turn());
            assert_eq!(pos.piece_on(m.whence()), Some(m.piece()));
            if let Some(v) = m.victim() {
                assert_eq!(v.color(), !pos.turn());
            }
        }
    }

    #[proptest]
    fn checkmate_implies_outcome(pos: Position) {
        assert!(!pos.is_checkmate() || pos.outcome() == Some(Outcome::Checkmate(!pos.turn())));
    }

    #[proptest]
    fn checkmate_and_stalemate_are_mutually_exclusive(pos: Position) {
        assert!(!(pos.is_checkmate() && pos.is_stalemate()));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut pos = Position::default();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let m = pos.parse_move(uci).assume();
            pos.play(m);
        }

        assert!(pos.is_checkmate());
        assert_eq!(pos.outcome(), Some(Outcome::Checkmate(Color::Black)));
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let pos: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().assume();
        assert!(pos.is_stalemate());
        assert_eq!(pos.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn castling_requires_safe_transit() {
        let pos: Position = "4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1".parse().assume();
        let legal = pos.legal();
        let castlings = Vec::from_iter(legal.iter().filter(|m| m.is_castling()));
        assert_eq!(castlings.len(), 1);
        assert_eq!(castlings[0].whither(), Square::C1);
    }

    #[test]
    fn castling_requires_an_empty_path() {
        let pos: Position = "4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1".parse().assume();
        assert!(!pos.legal().into_iter().any(|m| m.is_castling()));
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2".parse().assume();
        let m = pos.parse_move("e5d6").assume();
        assert!(m.is_en_passant());
        assert_eq!(m.target(), Square::D5);
        assert!(pos.captures().contains(&m));
    }

    #[test]
    fn en_passant_exposing_the_king_is_illegal() {
        let pos: Position = "8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 2".parse().assume();
        assert!(pos.parse_move("e5d6").is_err());
    }

    #[test]
    fn promotions_offer_all_roles() {
        let pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().assume();
        let legal = pos.legal();
        let promotions = Vec::from_iter(legal.iter().filter_map(|m| m.promotion()));
        assert_eq!(
            promotions,
            vec![Role::Queen, Role::Rook, Role::Bishop, Role::Knight]
        );
    }

    #[test]
    fn parse_move_rejects_illegal_moves() {
        let pos = Position::default();
        assert_eq!(
            pos.parse_move("e2e5"),
            Err(ParseMoveError("e2e5".to_string()))
        );
    }
}
