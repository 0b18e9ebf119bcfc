use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, MAX_FULL_MOVES, REPETITION_COUNT};

/// Episode limits for [`ChessEnv`](crate::env::chess_env::ChessEnv).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvConfig {
    /// The episode is drawn once the full-move number exceeds this.
    pub max_full_moves: u16,
    /// Half-move clock value that triggers the fifty-move draw.
    pub fifty_move_halfmoves: u16,
    /// Occurrences of the current position that end the game.
    pub repetition_count: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            max_full_moves: MAX_FULL_MOVES,
            fifty_move_halfmoves: FIFTY_MOVE_HALFMOVES,
            repetition_count: REPETITION_COUNT,
        }
    }
}
