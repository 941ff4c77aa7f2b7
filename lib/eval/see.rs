use crate::chess::{Bitboard, Color, Move, Position, Role, Square};
use crate::util::{Assume, Int};
use arrayvec::ArrayVec;

/// The least valuable piece of `side` attacking `sq` given the occupancy.
#[inline(always)]
fn least_valuable(
    pos: &Position,
    sq: Square,
    side: Color,
    occupied: Bitboard,
) -> Option<(Role, Square)> {
    let attackers = pos.attackers(sq, occupied) & pos.material(side);
    Role::iter().find_map(|r| {
        let sq = (attackers & pos.by_role(r)).first()?;
        Some((r, sq))
    })
}

/// Resolves the exchange on `sq` once the first capture, worth `first`, has been made.
///
/// The piece now standing on `sq` is worth `on_square` and `side` is to recapture.
fn swap(
    pos: &Position,
    sq: Square,
    mut side: Color,
    mut occupied: Bitboard,
    mut on_square: i32,
    first: i32,
    value: impl Fn(Role) -> i32,
) -> i32 {
    let mut gain = ArrayVec::<i32, 32>::new();
    gain.push(first);

    while let Some((role, wc)) = least_valuable(pos, sq, side, occupied) {
        let remaining = occupied.without(wc);
        if role == Role::King && least_valuable(pos, sq, !side, remaining).is_some() {
            break;
        }

        if gain.is_full() {
            break;
        }

        let prev = gain.last().copied().assume();
        gain.push(on_square - prev);
        on_square = value(role);
        occupied = remaining;
        side = !side;
    }

    for d in (1..gain.len()).rev() {
        gain[d - 1] = -(-gain[d - 1]).max(gain[d]);
    }

    gain[0]
}

/// The net material result of the best sequence of captures on `sq` started by `side`.
///
/// There must be a piece on `sq` and at least one piece of `side` attacking it.
pub fn exchange(pos: &Position, sq: Square, side: Color, value: impl Fn(Role) -> i32) -> i32 {
    let target = pos.piece_on(sq).assume();
    let occupied = pos.occupied();
    let (role, wc) = least_valuable(pos, sq, side, occupied).assume();

    let remaining = occupied.without(wc);
    if role == Role::King && least_valuable(pos, sq, !side, remaining).is_some() {
        return 0;
    }

    let first = value(target.role());
    swap(pos, sq, !side, remaining, value(role), first, value)
}

/// The net material result of playing `m` followed by the best sequence of recaptures.
pub fn exchange_move(pos: &Position, m: Move, value: impl Fn(Role) -> i32) -> i32 {
    (pos.piece_on(m.whence()) == Some(m.piece())).assume();

    let mut occupied = pos.occupied().without(m.whence()).with(m.whither());
    if m.is_en_passant() {
        occupied = occupied.without(m.target());
    }

    let mut first = m.victim().map_or(0, |v| value(v.role()));
    let mut on_square = value(m.piece().role());
    if let Some(r) = m.promotion() {
        first += value(r) - value(Role::Pawn);
        on_square = value(r);
    }

    let side = !m.piece().color();
    swap(pos, m.whither(), side, occupied, on_square, first, value)
}
