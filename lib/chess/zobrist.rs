use crate::chess::{Castles, File, Piece, Square};

/// A type representing a [`Position`][`crate::chess::Position`]'s zobrist hash.
pub type Zobrist = u64;

#[derive(Debug, Copy, Clone)]
pub struct ZobristNumbers {
    pieces: [[u64; 64]; 12],
    castles: [u64; 16],
    en_passant: [u64; 8],
    turn: u64,
}

/// One step of the [Wyrand] PRNG.
///
/// [Wyrand]: https://github.com/wangyi-fudan/wyhash
#[inline(always)]
const fn wyrand(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0xA0761D6478BD642F);
    let hi_lo = (state as u128).wrapping_mul((state ^ 0xE7037ED1A0B428DB) as u128);
    (state, (hi_lo >> 64) as u64 ^ hi_lo as u64)
}

/// Zobrist constants initialized at compile time.
static ZOBRIST: ZobristNumbers = const {
    let mut zobrist = ZobristNumbers {
        pieces: [[0; 64]; 12],
        castles: [0; 16],
        en_passant: [0; 8],
        turn: 0,
    };

    let mut state = 0x88C65730C3783F39u64;
    let mut number;

    let mut p = 0;
    while p < 12 {
        let mut sq = 0;
        while sq < 64 {
            (state, number) = wyrand(state);
            zobrist.pieces[p][sq] = number;
            sq += 1;
        }

        p += 1;
    }

    let mut i = 0;
    while i < 16 {
        (state, number) = wyrand(state);
        zobrist.castles[i] = number;
        i += 1;
    }

    let mut i = 0;
    while i < 8 {
        (state, number) = wyrand(state);
        zobrist.en_passant[i] = number;
        i += 1;
    }

    (_, number) = wyrand(state);
    zobrist.turn = number;

    zobrist
};

impl ZobristNumbers {
    /// The key of a piece standing on a square.
    #[inline(always)]
    pub const fn psq(piece: Piece, sq: Square) -> Zobrist {
        ZOBRIST.pieces[piece as usize][sq as usize]
    }

    /// The key of a castling rights configuration.
    #[inline(always)]
    pub const fn castling(castles: Castles) -> Zobrist {
        ZOBRIST.castles[castles.index() as usize]
    }

    /// The key of an en passant file.
    #[inline(always)]
    pub const fn en_passant(file: File) -> Zobrist {
        ZOBRIST.en_passant[file as usize]
    }

    /// The key of black to move.
    #[inline(always)]
    pub const fn turn() -> Zobrist {
        ZOBRIST.turn
    }
}
