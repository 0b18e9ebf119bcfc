use thiserror::Error;

use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("invalid game state: {0}")]
    InvalidState(String),
    #[error("perft worker thread panicked")]
    WorkerPanicked,
}

/// Legal move source for the side to move. `Send + Sync` so perft can share
/// one generator across worker threads.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<Move>>;
}
