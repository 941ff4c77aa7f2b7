use flint::chess::Position;

fn perft(fen: &str, expected: &[usize]) {
    let pos: Position = fen.parse().unwrap();
    for (depth, &count) in (1..).zip(expected) {
        assert_eq!(pos.perft(depth), count, "{fen} at depth {depth}");
    }
}

#[test]
fn starting_position() {
    perft(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8902, 197281],
    );
}

#[test]
#[ignore = "slow without optimizations"]
fn starting_position_at_depth_five() {
    let pos = Position::default();
    assert_eq!(pos.perft(5), 4_865_609);
}

#[test]
fn kiwipete() {
    perft(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2039, 97862],
    );
}

#[test]
fn en_passant_pins() {
    perft(
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[14, 191, 2812, 43238],
    );
}

#[test]
fn promotions_and_castling() {
    perft(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[6, 264, 9467],
    );
}

#[test]
fn discovered_checks() {
    perft(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1486, 62379],
    );
}

#[test]
fn symmetric_middlegame() {
    perft(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        &[46, 2079, 89890],
    );
}

#[test]
fn divide_sums_to_perft() {
    let pos = Position::default();
    let total: usize = pos.divide(3).into_iter().map(|(_, n)| n).sum();
    assert_eq!(total, pos.perft(3));
}
