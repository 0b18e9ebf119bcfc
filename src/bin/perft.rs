//! Perft runner.
//!
//! Usage:
//! `cargo run --release --bin perft -- --depth 5`
//! `cargo run --release --bin perft -- --fen "<fen>" --depth 3 --divide`

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use plum_chess_env::chess_errors::ChessError;
use plum_chess_env::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_chess_env::game_state::game_state::GameState;
use plum_chess_env::move_generation::legal_move_generator::LegalMoveGenerator;
use plum_chess_env::move_generation::perft::{perft, perft_divide, perft_multi_threaded};

#[derive(Debug, Parser)]
#[command(about = "Count leaf nodes of the legal move tree")]
struct Args {
    /// Root position.
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// Fork one worker per root move.
    #[arg(long)]
    threads: bool,

    /// Print the node count below each root move.
    #[arg(long)]
    divide: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "perft failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ChessError> {
    let game = GameState::from_fen(&args.fen)?;
    let started = Instant::now();

    if args.divide {
        let divide = perft_divide(&LegalMoveGenerator, &game, args.depth)?;
        let mut total = 0u64;
        for (mv, nodes) in &divide {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("\nmoves={} nodes={total}", divide.len());
        return Ok(());
    }

    let counts = if args.threads {
        perft_multi_threaded(Arc::new(LegalMoveGenerator), &game, args.depth)?
    } else {
        perft(&LegalMoveGenerator, &game, args.depth)?
    };

    let elapsed = started.elapsed();
    let nps = counts.nodes as f64 / elapsed.as_secs_f64().max(1e-9);
    println!(
        "depth={} nodes={} captures={} ep={} castles={} promotions={} checks={} elapsed_ms={} nps={:.0}",
        args.depth,
        counts.nodes,
        counts.captures,
        counts.en_passant,
        counts.castles,
        counts.promotions,
        counts.checks,
        elapsed.as_millis(),
        nps
    );
    Ok(())
}
