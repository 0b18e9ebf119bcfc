//! Full legal move generation pipeline.
//!
//! Computes the check and pin masks once, then runs the piece generators in
//! a fixed order: pawns, knights, rooks, bishops, queens, king, castling,
//! en passant. Every emitted move is legal; nothing is filtered afterwards.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::MoveMasks;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::{generate_en_passant_moves, generate_pawn_moves};
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<Move>> {
        validate_kings(game_state)?;
        Ok(legal_moves(game_state))
    }
}

/// Exactly one king per color, the precondition of every mask computation.
pub fn validate_kings(game_state: &GameState) -> MoveGenResult<()> {
    for color in [Color::Light, Color::Dark] {
        let kings = game_state.piece_bitboard(color, PieceKind::King).count_ones();
        if kings != 1 {
            return Err(MoveGenerationError::InvalidState(format!(
                "{color:?} has {kings} kings"
            )));
        }
    }
    Ok(())
}

/// Legal moves for the side to move, in generator order.
pub fn legal_moves(game_state: &GameState) -> Vec<Move> {
    let masks = MoveMasks::for_side_to_move(game_state);
    let mut out = Vec::with_capacity(64);

    // Under double check only the king may move.
    if masks.check_mask != 0 {
        generate_pawn_moves(game_state, &masks, &mut out);
        generate_knight_moves(game_state, &masks, &mut out);
        generate_rook_moves(game_state, &masks, &mut out);
        generate_bishop_moves(game_state, &masks, &mut out);
        generate_queen_moves(game_state, &masks, &mut out);
    }
    generate_king_moves(game_state, &masks, &mut out);
    generate_castling_moves(game_state, &masks, &mut out);
    generate_en_passant_moves(game_state, &masks, &mut out);

    out
}
