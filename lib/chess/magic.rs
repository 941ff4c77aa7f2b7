use crate::chess::{Bitboard, Color, File, Rank, Role, Square};
use crate::util::Int;
use derive_more::with_trait::{Display, Error};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::{sync::LazyLock, time::Instant};
use tracing::debug;

// Steps as (file, rank) deltas.
const BISHOP: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
const ROOK: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
const KING: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

const KNIGHT: [(i8, i8); 8] = [
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
];

/// The seed of the magic number search.
const SEED: u64 = 0x88C65730C3783F39;

/// The number of candidates tried per square before giving up.
const ATTEMPTS: u32 = 1 << 24;

/// The reason why building [`AttackTables`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum MagicError {
    #[display("failed to find a {_0} magic for {_1}")]
    NotFound(#[error(not(source))] Role, #[error(not(source))] Square),
    #[display("{_0} magic for {_1} disagrees with ray casting under {_2:?}")]
    Mismatch(
        #[error(not(source))] Role,
        #[error(not(source))] Square,
        #[error(not(source))] Bitboard,
    ),
}

/// A [magic bitboard] hash for a single square.
///
/// [magic bitboard]: https://www.chessprogramming.org/Magic_Bitboards
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Magic {
    mask: Bitboard,
    factor: u64,
    shift: u32,
    offset: usize,
}

impl Magic {
    /// The relevant blockers.
    #[inline(always)]
    pub fn mask(&self) -> Bitboard {
        self.mask
    }

    #[inline(always)]
    fn hash(&self, occupied: Bitboard) -> usize {
        ((occupied & self.mask).wrapping_mul(self.factor) >> self.shift) as usize
    }

    #[inline(always)]
    fn index(&self, occupied: Bitboard) -> usize {
        self.hash(occupied) + self.offset
    }
}

/// Precomputed attack sets for every piece on every square.
#[derive(Debug)]
pub struct AttackTables {
    pawns: [[Bitboard; 64]; 2],
    knights: [Bitboard; 64],
    kings: [Bitboard; 64],
    bishops: [Magic; 64],
    rooks: [Magic; 64],
    slides: Vec<Bitboard>,
}

static TABLES: LazyLock<AttackTables> = LazyLock::new(|| {
    let timer = Instant::now();
    match AttackTables::generate(SEED) {
        Ok(tables) => {
            let entries = tables.slides.len();
            debug!(elapsed = ?timer.elapsed(), entries, "attack tables ready");
            tables
        }

        Err(e) => panic!("{e}"),
    }
});

#[cold]
#[ctor::ctor]
#[inline(never)]
unsafe fn init() {
    LazyLock::force(&TABLES);
}

impl AttackTables {
    /// The process-wide tables.
    #[inline(always)]
    pub fn get() -> &'static Self {
        &TABLES
    }

    /// Builds the tables, searching for magics with a generator seeded by `seed`.
    ///
    /// The result is validated exhaustively before being returned.
    pub fn generate(seed: u64) -> Result<Self, MagicError> {
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut tables = AttackTables {
            pawns: [[Bitboard::empty(); 64]; 2],
            knights: [Bitboard::empty(); 64],
            kings: [Bitboard::empty(); 64],
            bishops: [Magic::default(); 64],
            rooks: [Magic::default(); 64],
            slides: Vec::new(),
        };

        for wc in Square::iter() {
            let full = Bitboard::full();
            let white = Bitboard::walk(wc, &[(-1, 1), (1, 1)], full).without(wc);
            let black = Bitboard::walk(wc, &[(-1, -1), (1, -1)], full).without(wc);
            tables.pawns[Color::White as usize][wc as usize] = white;
            tables.pawns[Color::Black as usize][wc as usize] = black;
            tables.knights[wc as usize] = Bitboard::walk(wc, &KNIGHT, full).without(wc);
            tables.kings[wc as usize] = Bitboard::walk(wc, &KING, full).without(wc);
        }

        for wc in Square::iter() {
            let magic = search(Role::Bishop, wc, &BISHOP, &mut rng, &mut tables.slides)?;
            tables.bishops[wc as usize] = magic;
            let magic = search(Role::Rook, wc, &ROOK, &mut rng, &mut tables.slides)?;
            tables.rooks[wc as usize] = magic;
        }

        tables.validate()?;
        Ok(tables)
    }

    /// Compares every magic lookup against brute force ray casting.
    pub fn validate(&self) -> Result<(), MagicError> {
        for wc in Square::iter() {
            for (role, steps) in [(Role::Bishop, &BISHOP), (Role::Rook, &ROOK)] {
                let magic = self.magic(role, wc);
                if magic.mask != relevance(wc, steps) {
                    return Err(MagicError::Mismatch(role, wc, magic.mask));
                }

                for blockers in magic.mask.subsets() {
                    let expected = Bitboard::walk(wc, steps, blockers).without(wc);
                    if self.slides.get(magic.index(blockers)) != Some(&expected) {
                        return Err(MagicError::Mismatch(role, wc, blockers));
                    }
                }
            }
        }

        Ok(())
    }

    /// The [`Magic`] of a slider on a square.
    ///
    /// # Panics
    ///
    /// Panics if `role` is neither [`Role::Bishop`] nor [`Role::Rook`].
    #[track_caller]
    #[inline(always)]
    pub fn magic(&self, role: Role, wc: Square) -> Magic {
        match role {
            Role::Bishop => self.bishops[wc as usize],
            Role::Rook => self.rooks[wc as usize],
            _ => panic!("{role} is not a slider"),
        }
    }

    /// Squares attacked by a pawn of some color.
    #[inline(always)]
    pub fn pawn(&self, wc: Square, color: Color) -> Bitboard {
        self.pawns[color as usize][wc as usize]
    }

    /// Squares attacked by a knight.
    #[inline(always)]
    pub fn knight(&self, wc: Square) -> Bitboard {
        self.knights[wc as usize]
    }

    /// Squares attacked by a king.
    #[inline(always)]
    pub fn king(&self, wc: Square) -> Bitboard {
        self.kings[wc as usize]
    }

    /// Squares attacked by a bishop given the board occupancy.
    #[inline(always)]
    pub fn bishop(&self, wc: Square, occupied: Bitboard) -> Bitboard {
        self.slides[self.bishops[wc as usize].index(occupied)]
    }

    /// Squares attacked by a rook given the board occupancy.
    #[inline(always)]
    pub fn rook(&self, wc: Square, occupied: Bitboard) -> Bitboard {
        self.slides[self.rooks[wc as usize].index(occupied)]
    }
}

/// The squares whose occupancy may change the attacks of a slider.
fn relevance(wc: Square, steps: &[(i8, i8)]) -> Bitboard {
    let ranks = (Rank::First.bitboard() | Rank::Eighth.bitboard()) & !wc.rank().bitboard();
    let files = (File::A.bitboard() | File::H.bitboard()) & !wc.file().bitboard();
    Bitboard::walk(wc, steps, Bitboard::empty()).without(wc) & !(ranks | files)
}

/// Randomized search for a collision free [`Magic`].
///
/// See <https://www.chessprogramming.org/Looking_for_Magics>.
fn search(
    role: Role,
    wc: Square,
    steps: &[(i8, i8)],
    rng: &mut SmallRng,
    slides: &mut Vec<Bitboard>,
) -> Result<Magic, MagicError> {
    let mask = relevance(wc, steps);
    let shift = u64::BITS - mask.len() as u32;
    let size = 1 << mask.len();

    let blockers = Vec::from_iter(mask.subsets());
    let slide = |&bb: &Bitboard| Bitboard::walk(wc, steps, bb).without(wc);
    let attacks = Vec::from_iter(blockers.iter().map(slide));

    let mut table = vec![Bitboard::empty(); size];
    let mut epoch = vec![0; size];

    for attempt in 1..=ATTEMPTS {
        let factor = rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>();
        if (mask.wrapping_mul(factor) >> 56).count_ones() < 6 {
            continue;
        }

        let magic = Magic {
            mask,
            factor,
            shift,
            offset: slides.len(),
        };
        let collision_free = blockers.iter().zip(&attacks).all(|(&bb, &moves)| {
            let idx = magic.hash(bb);
            if epoch[idx] != attempt {
                epoch[idx] = attempt;
                table[idx] = moves;
                true
            } else {
                table[idx] == moves
            }
        });

        if collision_free {
            let stale = |(i, bb): (usize, &Bitboard)| match epoch[i] == attempt {
                true => *bb,
                false => Bitboard::empty(),
            };

            slides.extend(table.iter().enumerate().map(stale));
            return Ok(magic);
        }
    }

    Err(MagicError::NotFound(role, wc))
}
