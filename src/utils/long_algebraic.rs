//! Long algebraic (coordinate) move text such as `e2e4` or `e7e8q`.

use crate::chess_errors::ChessError;
use crate::game_state::{chess_types::PieceKind, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Resolve coordinate text against the legal moves of `game_state`.
pub fn long_algebraic_to_move(text: &str, game_state: &GameState) -> Result<Move, ChessError> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::move_text(text, "expected 4 or 5 characters"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(
            promotion_from_char(ch).ok_or_else(|| ChessError::move_text(text, "unknown promotion piece"))?,
        ),
    };

    legal_moves(game_state)
        .into_iter()
        .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_piece() == promotion)
        .ok_or_else(|| ChessError::move_text(text, "no matching legal move"))
}

#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

fn promotion_from_char(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
