//! End-of-game detection for the side to move.
//!
//! Checks run in a fixed order and the first match wins: checkmate,
//! stalemate, fifty-move rule, repetition, insufficient material, move cap.

use std::fmt;

use crate::env::env_config::EnvConfig;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    Repetition,
    InsufficientMaterial,
    MoveCap,
}

impl GameOutcome {
    /// `(white, black)` rewards: ±1 for checkmate, zero for every draw.
    pub const fn rewards(self) -> (f32, f32) {
        match self {
            GameOutcome::Checkmate { winner: Color::Light } => (1.0, -1.0),
            GameOutcome::Checkmate { winner: Color::Dark } => (-1.0, 1.0),
            _ => (0.0, 0.0),
        }
    }

    pub const fn is_draw(self) -> bool {
        !matches!(self, GameOutcome::Checkmate { .. })
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner: Color::Light } => write!(f, "checkmate, white wins"),
            GameOutcome::Checkmate { winner: Color::Dark } => write!(f, "checkmate, black wins"),
            GameOutcome::Stalemate => write!(f, "stalemate"),
            GameOutcome::FiftyMoveRule => write!(f, "fifty-move rule"),
            GameOutcome::Repetition => write!(f, "repetition"),
            GameOutcome::InsufficientMaterial => write!(f, "insufficient material"),
            GameOutcome::MoveCap => write!(f, "move cap"),
        }
    }
}

/// Outcome of the position, or `None` while the game continues.
///
/// `legal_moves` must be the legal move list of `game_state`; the caller
/// already has it for the action mask.
pub fn game_outcome(game_state: &GameState, legal_moves: &[Move], config: &EnvConfig) -> Option<GameOutcome> {
    let side = game_state.side_to_move;

    if legal_moves.is_empty() {
        return Some(if is_king_in_check(game_state, side) {
            GameOutcome::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameOutcome::Stalemate
        });
    }

    if game_state.halfmove_clock >= config.fifty_move_halfmoves {
        return Some(GameOutcome::FiftyMoveRule);
    }

    if game_state.repetition_count(game_state.zobrist_key) >= config.repetition_count {
        return Some(GameOutcome::Repetition);
    }

    if is_insufficient_material(game_state) {
        return Some(GameOutcome::InsufficientMaterial);
    }

    if game_state.fullmove_number > config.max_full_moves {
        return Some(GameOutcome::MoveCap);
    }

    None
}

/// Dead positions under the usual rules: bare kings, a single minor piece,
/// or only bishops that all stand on one square color.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let mut heavy = 0u64;
    let mut knights = 0u64;
    let mut bishops = 0u64;
    for color in [Color::Light, Color::Dark] {
        heavy |= game_state.piece_bitboard(color, PieceKind::Pawn)
            | game_state.piece_bitboard(color, PieceKind::Rook)
            | game_state.piece_bitboard(color, PieceKind::Queen);
        knights |= game_state.piece_bitboard(color, PieceKind::Knight);
        bishops |= game_state.piece_bitboard(color, PieceKind::Bishop);
    }

    if heavy != 0 {
        return false;
    }

    let minors = knights.count_ones() + bishops.count_ones();
    if minors <= 1 {
        return true;
    }

    knights == 0 && (bishops & LIGHT_SQUARES == 0 || bishops & DARK_SQUARES == 0)
}
