use flint::chess::Position;
use flint::search::{Depth, Engine, Limits, Options, Ply, Score};
use flint::util::Int;
use std::time::Duration;

fn engine() -> Engine {
    Engine::with_options(Options::default().with_hash(1 << 20))
}

fn best(fen: &str, depth: i8) -> String {
    let pos: Position = fen.parse().unwrap();
    let info = engine().go(&pos, Limits::depth(Depth::new(depth)));
    info.best().unwrap().to_string()
}

#[test]
fn finds_back_rank_mate() {
    let pos: Position = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1".parse().unwrap();
    let info = engine().go(&pos, Limits::depth(Depth::new(3)));
    assert_eq!(info.best().unwrap().to_string(), "a1a8");
    assert_eq!(info.score(), Score::mating(Ply::new(1)));
}

#[test]
fn finds_scholars_mate() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    assert_eq!(best(fen, 3), "h5f7");
}

#[test]
fn captures_hanging_queen() {
    assert_eq!(best("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 4), "e4d5");
}

#[test]
fn avoids_losing_the_queen() {
    let pos: Position = "4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1".parse().unwrap();
    let info = engine().go(&pos, Limits::depth(Depth::new(4)));
    assert_ne!(info.best().unwrap().to_string(), "d1d5");
    assert!(info.score() > 0);
}

#[test]
fn stalemate_is_scored_as_draw() {
    let pos: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
    let info = engine().go(&pos, Limits::depth(Depth::new(2)));
    assert_eq!(info.best(), None);
    assert_eq!(info.score(), 0);
}

#[test]
fn avoids_stalemating_when_winning() {
    let pos: Position = "7k/8/6K1/8/8/8/8/5Q2 w - - 0 1".parse().unwrap();
    let info = engine().go(&pos, Limits::depth(Depth::new(3)));
    assert_ne!(info.best().unwrap().to_string(), "f1f7");
    assert!(info.score() > 0);
}

#[test]
fn depth_limit_is_honored() {
    let pos = Position::default();
    let infos: Vec<_> = engine().search(&pos, Limits::depth(Depth::new(4))).collect();
    assert_eq!(infos.len(), 4);
    assert_eq!(infos.last().unwrap().depth(), 4);
}

#[test]
fn node_limit_stops_between_depths() {
    let pos = Position::default();
    let infos: Vec<_> = engine().search(&pos, Limits::nodes(1_000)).collect();
    let last = infos.last().unwrap();
    assert!(infos.len() > 1);
    assert!(infos[infos.len() - 2].nodes() < 1_000);
    assert!(last.best().is_some());
}

#[test]
fn zero_time_still_completes_one_depth() {
    let pos = Position::default();
    let infos: Vec<_> = engine().search(&pos, Limits::time(Duration::ZERO)).collect();
    assert_eq!(infos.len(), 1);
    assert!(infos[0].best().is_some());
}

#[test]
fn disabling_pruning_does_not_change_mate_scores() {
    let pos: Position = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1".parse().unwrap();
    let options = Options::default()
        .with_hash(1 << 20)
        .with_null_move(false)
        .with_lmr(false);

    let info = Engine::with_options(options).go(&pos, Limits::depth(Depth::new(3)));
    assert_eq!(info.score(), Score::mating(Ply::new(1)));
}
