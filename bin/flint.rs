use anyhow::Error as Failure;
use clap::{Parser, Subcommand};
use flint::chess::Position;
use flint::search::{Engine, Info, Limits, Mate, Options};
use flint::util::Int;
use std::io::{self, Write, stdout};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "Flint", version)]
#[clap(about = "A chess search kernel")]
struct Cli {
    /// Transposition table size in MiB.
    #[arg(long, global = true, default_value_t = 16)]
    hash: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Searches a position and prints one line per completed depth.
    Search {
        /// The position in FEN, defaults to the starting position.
        #[arg(long)]
        fen: Option<Position>,

        /// Maximum depth in plies.
        #[arg(long)]
        depth: Option<i8>,

        /// Maximum number of nodes.
        #[arg(long)]
        nodes: Option<u64>,

        /// Time budget in milliseconds.
        #[arg(long)]
        time: Option<u64>,

        /// Disables null move pruning.
        #[arg(long)]
        no_null_move: bool,

        /// Disables late move reductions.
        #[arg(long)]
        no_lmr: bool,

        /// Maximum quiescence depth.
        #[arg(long, default_value_t = 16)]
        quiescence: u8,
    },

    /// Counts the positions reachable from a position.
    Perft {
        /// The position in FEN, defaults to the starting position.
        #[arg(long)]
        fen: Option<Position>,

        /// The depth in plies.
        depth: u8,

        /// Prints the count under each legal move.
        #[arg(long)]
        divide: bool,
    },
}

/// Formats the score the way chess interfaces expect it.
fn score(info: &Info) -> String {
    match info.score().mate() {
        Mate::Mating(p) => format!("mate {}", (p.get() + 1) / 2),
        Mate::Mated(p) => format!("mate -{}", p.get() / 2),
        Mate::None => format!("cp {}", info.score()),
    }
}

fn search(pos: &Position, options: Options, limits: Limits) -> io::Result<()> {
    let mut engine = Engine::with_options(options);
    let mut stdout = stdout().lock();
    let mut last = None;

    for info in engine.search(pos, limits) {
        writeln!(
            stdout,
            "info depth {} score {} nodes {} time {} nps {:.0} pv {}",
            info.depth(),
            score(&info),
            info.nodes(),
            info.time().as_millis(),
            info.nps(),
            info.pv(),
        )?;

        last = Some(info);
    }

    match last.as_ref().and_then(Info::best) {
        Some(m) => writeln!(stdout, "bestmove {m}")?,
        None => writeln!(stdout, "bestmove (none)")?,
    }

    if let Some(info) = last {
        let stats = info.stats();
        info!(
            depth = %info.depth(),
            nodes = stats.nodes,
            leaves = stats.leaves,
            qnodes = stats.qnodes,
            "search finished"
        );
    }

    Ok(())
}

fn perft(pos: &Position, depth: u8, divide: bool) -> io::Result<()> {
    let mut stdout = stdout().lock();

    if divide {
        let mut total = 0;
        for (m, count) in pos.divide(depth) {
            writeln!(stdout, "{m}: {count}")?;
            total += count;
        }

        writeln!(stdout)?;
        writeln!(stdout, "{total}")?;
    } else {
        writeln!(stdout, "{}", pos.perft(depth))?;
    }

    Ok(())
}

fn main() -> Result<(), Failure> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();

    match args.command {
        Command::Search {
            fen,
            depth,
            nodes,
            time,
            no_null_move,
            no_lmr,
            quiescence,
        } => {
            let pos = fen.unwrap_or_default();
            let options = Options::default()
                .with_hash(args.hash << 20)
                .with_null_move(!no_null_move)
                .with_lmr(!no_lmr)
                .with_quiescence(quiescence);

            let mut limits = Limits::none();
            if let Some(d) = depth {
                limits = limits.with_depth(d.saturate());
            }

            if let Some(n) = nodes {
                limits = limits.with_nodes(n);
            }

            if let Some(ms) = time {
                limits = limits.with_time(Duration::from_millis(ms));
            }

            if limits == Limits::none() {
                limits = limits.with_depth(6i8.saturate());
            }

            search(&pos, options, limits)?;
        }

        Command::Perft { fen, depth, divide } => {
            let pos = fen.unwrap_or_default();
            info!(%pos, depth, "counting positions");
            perft(&pos, depth, divide)?;
        }
    }

    Ok(())
}
