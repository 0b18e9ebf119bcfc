use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::MoveMasks;
use crate::move_generation::legal_moves_bishop::generate_diagonal_slides;
use crate::move_generation::legal_moves_rook::generate_orthogonal_slides;
use crate::moves::move_descriptions::Move;

/// Queen moves as the union of an orthogonal and a diagonal slider; each
/// half honors its own pin axis.
pub fn generate_queen_moves(game_state: &GameState, masks: &MoveMasks, out: &mut Vec<Move>) {
    let mut queens = game_state.piece_bitboard(game_state.side_to_move, PieceKind::Queen);
    while queens != 0 {
        let queen = queens & queens.wrapping_neg();
        generate_orthogonal_slides(game_state, masks, queen, out);
        generate_diagonal_slides(game_state, masks, queen, out);
        queens &= queens - 1;
    }
}
