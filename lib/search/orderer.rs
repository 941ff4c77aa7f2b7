use crate::chess::{Move, Position, Role};
use crate::eval::Evaluator;
use crate::search::{History, Killers, Moves, Rating};
use crate::util::Int;

/// What the search knows about a node beyond the position itself.
#[derive(Debug, Copy, Clone)]
pub struct Hints<'a> {
    /// The best move recorded in the transposition table.
    pub best: Option<Move>,
    /// The killer moves at the current ply.
    pub killers: Killers,
    /// The history heuristic table.
    pub history: &'a History,
}

/// A trait for types that rate [`Move`]s so the most promising are searched first.
pub trait MoveOrderer {
    /// Rates a [`Move`], higher ratings are searched first.
    fn rate<E: Evaluator>(
        &self,
        evaluator: &E,
        pos: &Position,
        m: Move,
        hints: &Hints<'_>,
    ) -> Rating;

    /// Rates all [`Moves`].
    #[inline(always)]
    fn sort<E: Evaluator>(
        &self,
        evaluator: &E,
        pos: &Position,
        moves: &mut Moves,
        hints: &Hints<'_>,
    ) {
        moves.sort(|m| self.rate(evaluator, pos, m, hints));
    }
}

impl<O: MoveOrderer + ?Sized> MoveOrderer for &O {
    #[inline(always)]
    fn rate<E: Evaluator>(
        &self,
        evaluator: &E,
        pos: &Position,
        m: Move,
        hints: &Hints<'_>,
    ) -> Rating {
        (*self).rate(evaluator, pos, m, hints)
    }
}

/// Orders the transposition move first, then winning captures by material gain,
/// then killers, then quiet moves by history, then losing captures.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Orderer;

impl Orderer {
    /// Base rating of captures and promotions that do not lose material.
    pub const GOOD_NOISY: i32 = 2_000_000;

    /// Base rating of killer moves.
    pub const KILLER: i32 = 1_000_000;

    /// Base rating of captures that lose material.
    pub const BAD_NOISY: i32 = -2_000_000;

    /// The material gain of a noisy [`Move`], resolved by static exchange when the
    /// most valuable victim and least valuable attacker heuristic predicts a loss.
    fn gain<E: Evaluator>(evaluator: &E, pos: &Position, m: Move) -> i32 {
        let value = |r: Role| evaluator.value(r).cast::<i32>();

        let mut gain = m.victim().map_or(0, |v| value(v.role()));
        if let Some(r) = m.promotion() {
            gain += value(r) - value(Role::Pawn);
        }

        if m.is_capture() {
            gain -= value(m.piece().role());
        }

        if gain < 0 {
            evaluator.see_move(pos, m).cast()
        } else {
            gain
        }
    }
}

impl MoveOrderer for Orderer {
    fn rate<E: Evaluator>(
        &self,
        evaluator: &E,
        pos: &Position,
        m: Move,
        hints: &Hints<'_>,
    ) -> Rating {
        if hints.best == Some(m) {
            Rating::upper()
        } else if m.is_noisy() {
            match Self::gain(evaluator, pos, m) {
                gain @ 0.. => Rating::new(Self::GOOD_NOISY + gain),
                gain => Rating::new(Self::BAD_NOISY + gain),
            }
        } else if let Some(slot) = hints.killers.slot(m) {
            Rating::new(Self::KILLER - slot as i32)
        } else {
            let bonus = hints.history.get(pos.turn(), m);
            Rating::new(bonus.clamp(-History::LIMIT, History::LIMIT))
        }
    }
}
