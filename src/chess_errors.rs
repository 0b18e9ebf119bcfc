//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type returned by parsing, state
//! transition and the environment protocol. Input errors (bad FEN, bad
//! move text, an action outside the legal set) are recoverable by the
//! caller. `NoPieceOnSquare` and `InvariantViolation` mean a caller broke
//! the apply-move contract or the state is corrupt; they are reported
//! instead of producing a wrong position.

use thiserror::Error;

use crate::game_state::chess_types::Square;
use crate::move_generation::move_generator::MoveGenerationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The position snapshot string could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A coordinate such as `e4` was malformed.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move text was malformed or matched no legal move.
    #[error("invalid move text '{text}': {reason}")]
    InvalidMoveText { text: String, reason: String },

    /// Action index outside `0..4672` or not in the current legal set.
    #[error("action {0} is not legal in the current position")]
    IllegalAction(u16),

    /// Move application found no friendly piece on the source square.
    #[error("no piece of the side to move on square {0}")]
    NoPieceOnSquare(Square),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
}

impl ChessError {
    pub(crate) fn move_text(text: &str, reason: impl Into<String>) -> Self {
        ChessError::InvalidMoveText {
            text: text.to_owned(),
            reason: reason.into(),
        }
    }
}
