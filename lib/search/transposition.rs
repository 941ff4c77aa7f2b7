use crate::chess::{Color, Move};
use crate::search::{Depth, Ply, Score};
use crate::util::Assume;
use std::ops::Range;

/// A score together with how it relates to the window it was searched with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum ScoreBound {
    /// The search failed high, the true score is at least this.
    Lower(Score),
    /// The search failed low, the true score is at most this.
    Upper(Score),
    Exact(Score),
}

impl ScoreBound {
    /// Classifies `score` against `bounds` and rebases mates found at `ply` onto the node.
    #[track_caller]
    #[inline(always)]
    pub fn new(bounds: Range<Score>, score: Score, ply: Ply) -> Self {
        (bounds.start < bounds.end).assume();

        let stored = score.stored(ply);
        match score {
            s if s >= bounds.end => ScoreBound::Lower(stored),
            s if s <= bounds.start => ScoreBound::Upper(stored),
            _ => ScoreBound::Exact(stored),
        }
    }

    /// The bounding score as seen `ply` half-moves from the root.
    #[inline(always)]
    pub fn bound(&self, ply: Ply) -> Score {
        let (ScoreBound::Lower(s) | ScoreBound::Upper(s) | ScoreBound::Exact(s)) = *self;
        s.loaded(ply)
    }
}

/// A transposition table entry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Transposition {
    score: ScoreBound,
    depth: Depth,
    turn: Color,
    best: Option<Move>,
}

impl Transposition {
    #[inline(always)]
    pub fn new(score: ScoreBound, depth: Depth, turn: Color, best: Option<Move>) -> Self {
        Transposition {
            score,
            depth,
            turn,
            best,
        }
    }

    #[inline(always)]
    pub fn score(&self) -> ScoreBound {
        self.score
    }

    /// The remaining depth the entry was searched to.
    #[inline(always)]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// The side to move in the stored position.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The move that raised alpha or caused the cutoff, if any.
    #[inline(always)]
    pub fn best(&self) -> Option<Move> {
        self.best
    }
}
