use crate::chess::{Color, Move, Position, Role, Square};
use crate::eval::{Value, exchange, exchange_move};
use crate::util::Int;

/// A static evaluation function.
pub trait Evaluator {
    /// The static evaluation of a [`Position`], positive when White stands better.
    fn evaluate(&self, pos: &Position) -> Value;

    /// The nominal value of a piece of a given [`Role`].
    fn value(&self, role: Role) -> Value;

    /// The [static exchange evaluation] of captures on `sq` initiated by `side`.
    ///
    /// The first capture is made by the least valuable attacker, which must exist.
    ///
    /// [static exchange evaluation]: https://www.chessprogramming.org/Static_Exchange_Evaluation
    #[inline(always)]
    fn see(&self, pos: &Position, sq: Square, side: Color) -> Value {
        exchange(pos, sq, side, |r| self.value(r).cast()).saturate()
    }

    /// The static exchange evaluation of a [`Move`] followed by the best sequence of recaptures.
    #[inline(always)]
    fn see_move(&self, pos: &Position, m: Move) -> Value {
        exchange_move(pos, m, |r| self.value(r).cast()).saturate()
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    #[inline(always)]
    fn evaluate(&self, pos: &Position) -> Value {
        (*self).evaluate(pos)
    }

    #[inline(always)]
    fn value(&self, role: Role) -> Value {
        (*self).value(role)
    }
}
