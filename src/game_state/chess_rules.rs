//! Canonical chess-rule constants.
//!
//! Static rule literals shared by state setup, the termination checks, and
//! the encoding layer.

use crate::game_state::chess_types::Square;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Number of pre-move snapshots retained for encoding and repetition lookups.
pub const HISTORY_LENGTH: usize = 7;

/// Half-moves without a pawn move or capture that end the game.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of the same position that end the game.
pub const REPETITION_COUNT: u32 = 3;

/// Full-move cap; the game is drawn once the counter exceeds it.
pub const MAX_FULL_MOVES: u16 = 250;

pub const LIGHT_KING_START: Square = 4;
pub const DARK_KING_START: Square = 60;

/// Rook corners whose rook loses (or whose capture removes) a castling right.
pub const LIGHT_QUEENSIDE_ROOK: Square = 0;
pub const LIGHT_KINGSIDE_ROOK: Square = 7;
pub const DARK_QUEENSIDE_ROOK: Square = 56;
pub const DARK_KINGSIDE_ROOK: Square = 63;
