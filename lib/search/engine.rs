use crate::chess::{Color, Move, Position};
use crate::eval::{Evaluator, Material};
use crate::search::*;
use crate::util::{Assume, Int};
use std::ops::Range;
use tracing::debug;

/// The number of plies the search can reach.
const PLIES: usize = Ply::MAX as usize + 1;

/// The state of a single iteration of the search.
#[derive(Debug)]
struct Stack<'a, E, O> {
    options: &'a Options,
    evaluator: &'a E,
    orderer: &'a O,
    tt: &'a mut TranspositionTable,
    history: &'a mut History,
    killers: &'a mut [Killers; PLIES],
    lines: Box<[Pv; PLIES]>,
    root: Option<Move>,
    stats: Statistics,
}

impl<'a, E: Evaluator, O: MoveOrderer> Stack<'a, E, O> {
    fn new(
        engine: &'a mut Engine<E, O>,
        killers: &'a mut [Killers; PLIES],
        root: Option<Move>,
    ) -> Self {
        let Engine {
            options,
            evaluator,
            orderer,
            tt,
            history,
        } = engine;

        Stack {
            options,
            evaluator,
            orderer,
            tt,
            history,
            killers,
            lines: Box::new(std::array::from_fn(|_| Pv::empty())),
            root,
            stats: Statistics::default(),
        }
    }

    /// The static evaluation from the point of view of the side to move.
    #[inline(always)]
    fn evaluate(&self, pos: &Position) -> Score {
        let value = self.evaluator.evaluate(pos);
        match pos.turn() {
            Color::White => value.saturate(),
            Color::Black => (-value).saturate(),
        }
    }

    /// Rates all [`Moves`] given what is known about the current node.
    #[inline(always)]
    fn sort(&self, pos: &Position, moves: &mut Moves, best: Option<Move>, killers: Killers) {
        let hints = Hints {
            best,
            killers,
            history: &*self.history,
        };

        self.orderer.sort(self.evaluator, pos, moves, &hints);
    }

    /// The principal variation search.
    ///
    /// The line that produced the score is left in `self.lines[ply]`.
    fn pvs(&mut self, pos: &mut Position, bounds: Range<Score>, depth: Depth, ply: Ply) -> Score {
        (bounds.start < bounds.end).assume();
        self.stats.nodes += 1;

        let index = ply.cast::<usize>();
        self.lines[index] = Pv::empty();

        let (mut alpha, mut beta) = (bounds.start, bounds.end);
        let is_pv = alpha + 1 < beta;

        if ply > 0 && pos.is_draw() {
            return Score::new(0).clamp(alpha, beta);
        } else if ply >= Ply::MAX {
            return self.evaluate(pos).clamp(alpha, beta);
        }

        let turn = pos.turn();
        let tpos = self.tt.load(pos.zobrist()).filter(|t| t.turn() == turn);
        if let Some(t) = tpos.filter(|t| ply > 0 && t.depth() >= depth) {
            let score = t.score().bound(ply);
            match t.score() {
                ScoreBound::Exact(_) => {
                    self.lines[index] = t.best().map_or_else(Pv::empty, Pv::singular);
                    return score.clamp(alpha, beta);
                }
                ScoreBound::Lower(_) => alpha = alpha.max(score),
                ScoreBound::Upper(_) => beta = beta.min(score),
            }

            if alpha >= beta {
                return score.clamp(bounds.start, bounds.end);
            }
        }

        if depth <= 0 {
            self.stats.leaves += 1;
            return self.qs(pos, alpha..beta, ply, 0);
        }

        let in_check = pos.is_check();
        if self.options.null_move
            && !is_pv
            && ply > 0
            && !in_check
            && pos.last().is_some()
            && pos.has_non_pawn_material()
            && self.evaluate(pos) >= beta
        {
            let r = self.options.null_move_reduction;
            pos.pass();
            let score = -self.pvs(pos, -beta..-beta + 1, depth - 1 - r, ply + 1);
            pos.undo();

            if score >= beta {
                return beta;
            }
        }

        let best = match ply.get() {
            0 => self.root.or(tpos.and_then(|t| t.best())),
            _ => tpos.and_then(|t| t.best()),
        };

        let mut moves = Moves::from_iter(pos.pseudo_legal());
        self.sort(pos, &mut moves, best, self.killers[index]);

        let window = alpha..beta;
        let mut legal = 0;
        for m in moves.sorted() {
            if !pos.play_legal(m) {
                continue;
            }

            legal += 1;
            let next = depth - 1;
            let score = if legal == 1 {
                -self.pvs(pos, -beta..-alpha, next, ply + 1)
            } else {
                let reduction = match legal {
                    _ if !self.options.lmr || is_pv || in_check => 0,
                    _ if !m.is_quiet() || pos.is_check() => 0,
                    n if n > self.options.lmr_deep => 2,
                    n if n > self.options.lmr_prefix => 1,
                    _ => 0,
                };

                let mut score = -self.pvs(pos, -alpha - 1..-alpha, next - reduction, ply + 1);
                if reduction > 0 && score > alpha {
                    score = -self.pvs(pos, -alpha - 1..-alpha, next, ply + 1);
                }

                if score > alpha && score < beta {
                    score = -self.pvs(pos, -beta..-alpha, next, ply + 1);
                }

                score
            };

            pos.undo();

            if score >= beta {
                if m.is_quiet() {
                    self.killers[index].insert(m);
                    self.history.update(pos.turn(), m, depth);
                }

                self.lines[index] = Pv::singular(m);
                let score = ScoreBound::new(window, beta, ply);
                let tpos = Transposition::new(score, depth, pos.turn(), Some(m));
                self.tt.store(pos.zobrist(), tpos);
                return beta;
            }

            if score > alpha {
                alpha = score;
                let tail = std::mem::take(&mut self.lines[index + 1]);
                self.lines[index] = Pv::cons(m, tail);
            }
        }

        if legal == 0 {
            let score = match in_check {
                true => Score::mated(ply),
                false => Score::new(0),
            };

            return score.clamp(alpha, beta);
        }

        let score = ScoreBound::new(window, alpha, ply);
        let tpos = Transposition::new(score, depth, pos.turn(), self.lines[index].head());
        self.tt.store(pos.zobrist(), tpos);
        alpha
    }

    /// The [quiescence search].
    ///
    /// [quiescence search]: https://www.chessprogramming.org/Quiescence_Search
    fn qs(&mut self, pos: &mut Position, bounds: Range<Score>, ply: Ply, qply: u8) -> Score {
        (bounds.start < bounds.end).assume();
        self.stats.qnodes += 1;

        let (mut alpha, beta) = (bounds.start, bounds.end);
        if ply >= Ply::MAX {
            return self.evaluate(pos).clamp(alpha, beta);
        }

        let in_check = pos.is_check();
        if qply >= self.options.quiescence {
            let score = match (pos.has_legal_move(), in_check) {
                (true, _) => self.evaluate(pos),
                (false, true) => Score::mated(ply),
                (false, false) => Score::new(0),
            };

            return score.clamp(alpha, beta);
        }

        if !in_check {
            let stand = self.evaluate(pos);
            if stand >= beta {
                return beta;
            }

            alpha = alpha.max(stand);
        }

        let mut moves = match in_check {
            true => Moves::from_iter(pos.pseudo_legal()),
            false => Moves::from_iter(pos.captures()),
        };

        self.sort(pos, &mut moves, None, Killers::default());

        let mut legal = false;
        for m in moves.sorted() {
            if !pos.play_legal(m) {
                continue;
            }

            legal = true;
            let score = -self.qs(pos, -beta..-alpha, ply + 1, qply + 1);
            pos.undo();

            if score >= beta {
                return beta;
            }

            alpha = alpha.max(score);
        }

        if !legal && in_check {
            Score::mated(ply).clamp(bounds.start, beta)
        } else if !legal && !pos.has_legal_move() {
            Score::new(0).clamp(bounds.start, beta)
        } else {
            alpha
        }
    }
}

/// An iterator over the completed iterations of an [iterative deepening] search.
///
/// [iterative deepening]: https://www.chessprogramming.org/Iterative_Deepening
#[derive(Debug)]
pub struct Search<'e, E: Evaluator = Material, O: MoveOrderer = Orderer> {
    engine: &'e mut Engine<E, O>,
    pos: Position,
    ctrl: Control,
    killers: Box<[Killers; PLIES]>,
    depth: Depth,
    nodes: u64,
    best: Option<Move>,
    done: bool,
}

impl<'e, E: Evaluator, O: MoveOrderer> Search<'e, E, O> {
    fn new(engine: &'e mut Engine<E, O>, pos: &Position, limits: Limits) -> Self {
        engine.tt.clear();
        engine.history.clear();

        Search {
            engine,
            pos: pos.clone(),
            ctrl: Control::new(limits),
            killers: Box::new([Killers::default(); PLIES]),
            depth: Depth::new(0),
            nodes: 0,
            best: None,
            done: false,
        }
    }

    /// Runs the search to completion and returns the last [`Info`].
    pub fn conclude(self) -> Info {
        self.last().assume()
    }
}

impl<E: Evaluator, O: MoveOrderer> Iterator for Search<'_, E, O> {
    type Item = Info;

    fn next(&mut self) -> Option<Info> {
        let exhausted = self.depth > 0 && self.ctrl.is_exhausted(self.nodes, self.depth.get());
        if self.done || exhausted {
            self.done = true;
            return None;
        }

        let depth = self.depth + 1;
        let mut stack = Stack::new(self.engine, &mut self.killers, self.best);
        let bounds = Score::lower()..Score::upper();
        let score = stack.pvs(&mut self.pos, bounds, depth, Ply::new(0));
        let (stats, pv) = (stack.stats, std::mem::take(&mut stack.lines[0]));

        self.depth = depth;
        self.nodes += stats.total();
        self.best = pv.head();
        self.done = self.best.is_none();

        let info = Info::new(depth, self.ctrl.elapsed(), self.nodes, stats, score, pv);

        debug!(
            depth = depth.get(),
            score = %info.score(),
            nodes = self.nodes,
            qnodes = stats.qnodes,
            pv = %info.pv(),
            "completed iteration"
        );

        Some(info)
    }
}

/// A chess engine.
#[derive(Debug)]
pub struct Engine<E: Evaluator = Material, O: MoveOrderer = Orderer> {
    options: Options,
    evaluator: E,
    orderer: O,
    tt: TranspositionTable,
    history: History,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Initializes the engine with the default [`Options`].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Initializes the engine with the given [`Options`].
    pub fn with_options(options: Options) -> Self {
        Engine::with(options, Material, Orderer)
    }
}

impl<E: Evaluator, O: MoveOrderer> Engine<E, O> {
    /// Initializes the engine with the given [`Options`], [`Evaluator`] and [`MoveOrderer`].
    pub fn with(options: Options, evaluator: E, orderer: O) -> Self {
        Engine {
            tt: TranspositionTable::new(options.hash),
            history: History::default(),
            options,
            evaluator,
            orderer,
        }
    }

    /// The engine's [`Options`].
    #[inline(always)]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The engine's [`Evaluator`].
    #[inline(always)]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Initiates a [`Search`].
    ///
    /// The transposition table and the history are cleared beforehand.
    pub fn search(&mut self, pos: &Position, limits: Limits) -> Search<'_, E, O> {
        Search::new(self, pos, limits)
    }

    /// Searches the [`Position`] within the [`Limits`] and returns the last completed [`Info`].
    pub fn go(&mut self, pos: &Position, limits: Limits) -> Info {
        self.search(pos, limits).conclude()
    }
}
