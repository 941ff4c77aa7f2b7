use crate::chess::{Color, Position, Role, Square};
use crate::eval::{Evaluator, Value};
use crate::util::Int;

#[rustfmt::skip]
const PAWN: [i16; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT: [i16; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP: [i16; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  0,  5, 10, 10,  5,  0,-10,
   -10,  5,  5, 10, 10,  5,  5,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10, 10, 10, 10, 10, 10, 10,-10,
   -10,  5,  0,  0,  0,  0,  5,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK: [i16; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN: [i16; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  0,  5,  5,  5,  5,  0,-10,
    -5,  0,  5,  5,  5,  5,  0, -5,
     0,  0,  5,  5,  5,  5,  0, -5,
   -10,  5,  5,  5,  5,  5,  0,-10,
   -10,  0,  5,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDGAME: [i16; 64] = [
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -20,-30,-30,-40,-40,-30,-30,-20,
   -10,-20,-20,-20,-20,-20,-20,-10,
    20, 20,  0,  0,  0,  0, 20, 20,
    20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_ENDGAME: [i16; 64] = [
   -50,-40,-30,-20,-20,-30,-40,-50,
   -30,-20,-10,  0,  0,-10,-20,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-30,  0,  0,  0,  0,-30,-30,
   -50,-30,-30,-30,-30,-30,-30,-50,
];

const BISHOP_PAIR: i32 = 30;

/// The game phase at the opening, counting minor pieces once, rooks twice and queens four times.
const OPENING: i32 = 24;

/// A material and piece-square table evaluator.
///
/// The king's placement is tapered between middle game and endgame by the remaining material.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Material;

impl Material {
    /// The game phase, from 0 in bare endings to [`OPENING`] with all pieces on the board.
    fn phase(pos: &Position) -> i32 {
        let weight = |r: Role, w: i32| pos.by_role(r).len() as i32 * w;
        let phase = weight(Role::Knight, 1)
            + weight(Role::Bishop, 1)
            + weight(Role::Rook, 2)
            + weight(Role::Queen, 4);

        phase.min(OPENING)
    }

    /// The piece-square bonus of a piece of `role` and `side` on `sq`.
    fn placement(role: Role, side: Color, sq: Square, phase: i32) -> i32 {
        let idx = match side {
            Color::White => sq.cast::<usize>() ^ 56,
            Color::Black => sq.cast::<usize>(),
        };

        let bonus = match role {
            Role::Pawn => PAWN[idx],
            Role::Knight => KNIGHT[idx],
            Role::Bishop => BISHOP[idx],
            Role::Rook => ROOK[idx],
            Role::Queen => QUEEN[idx],
            Role::King => {
                let mg = i32::from(KING_MIDGAME[idx]) * phase;
                let eg = i32::from(KING_ENDGAME[idx]) * (OPENING - phase);
                return (mg + eg) / OPENING;
            }
        };

        i32::from(bonus)
    }
}

impl Evaluator for Material {
    fn evaluate(&self, pos: &Position) -> Value {
        let phase = Self::phase(pos);
        let mut score = 0i32;

        for (p, sq) in pos.iter() {
            let (role, side) = (p.role(), p.color());
            let v = self.value(role).cast::<i32>() + Self::placement(role, side, sq, phase);
            score += i32::from(side.sign()) * v;
        }

        for side in Color::iter() {
            if (pos.material(side) & pos.by_role(Role::Bishop)).len() >= 2 {
                score += i32::from(side.sign()) * BISHOP_PAIR;
            }
        }

        score.saturate()
    }

    #[inline(always)]
    fn value(&self, role: Role) -> Value {
        Value::new(match role {
            Role::Pawn => 100,
            Role::Knight => 320,
            Role::Bishop => 330,
            Role::Rook => 500,
            Role::Queen => 900,
            Role::King => 0,
        })
    }
}
