//! Plays random legal games through the action protocol and tallies the
//! outcomes.
//!
//! Usage:
//! `cargo run --release --bin random_rollouts -- --games 200 --seed 7`

use std::collections::BTreeMap;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::error;
use tracing_subscriber::EnvFilter;

use plum_chess_env::chess_errors::ChessError;
use plum_chess_env::env::chess_env::ChessEnv;
use plum_chess_env::env::env_config::EnvConfig;
use plum_chess_env::game_state::chess_rules::MAX_FULL_MOVES;
use plum_chess_env::game_state::game_state::GameState;

#[derive(Debug, Parser)]
#[command(about = "Random self-play through the action-integer environment")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = MAX_FULL_MOVES)]
    max_full_moves: u16,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "rollouts failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ChessError> {
    let config = EnvConfig {
        max_full_moves: args.max_full_moves,
        ..EnvConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut tally: BTreeMap<String, u32> = BTreeMap::new();
    let mut plies = 0u64;
    let mut draws = 0u32;
    let started = Instant::now();

    for _ in 0..args.games {
        let mut env = ChessEnv::with_config(GameState::new_game(), config)?;
        while !env.is_terminated() {
            let actions = env.legal_actions()?;
            let Some(&action) = actions.choose(&mut rng) else {
                break;
            };
            env.step(action)?;
            plies += 1;
        }
        if env.outcome().is_some_and(|outcome| outcome.is_draw()) {
            draws += 1;
        }
        let label = env.outcome().map_or_else(|| "unfinished".to_owned(), |outcome| outcome.to_string());
        *tally.entry(label).or_insert(0) += 1;
    }

    let elapsed = started.elapsed();
    println!(
        "games={} draws={draws} plies={plies} elapsed_ms={} plies_per_sec={:.0}",
        args.games,
        elapsed.as_millis(),
        plies as f64 / elapsed.as_secs_f64().max(1e-9)
    );
    for (label, count) in tally {
        println!("{label}: {count}");
    }
    Ok(())
}
