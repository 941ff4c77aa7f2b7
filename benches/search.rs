use criterion::{Criterion, criterion_group, criterion_main};
use flint::chess::Position;
use flint::search::{Depth, Engine, Limits, Options};
use flint::util::Int;
use std::hint::black_box;

fn perft(c: &mut Criterion) {
    let pos = Position::default();
    c.bench_function("perft/4", |b| {
        b.iter(|| black_box(&pos).perft(4))
    });
}

fn search(c: &mut Criterion) {
    let options = Options::default().with_hash(16 << 20);
    let limits = Limits::depth(Depth::new(6));

    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ] {
        let pos: Position = fen.parse().unwrap();
        let mut engine = Engine::with_options(options.clone());
        c.bench_function(&format!("search/{fen}"), |b| {
            b.iter(|| engine.go(black_box(&pos), limits.clone()))
        });
    }
}

criterion_group!(benches, perft, search);
criterion_main!(benches);
