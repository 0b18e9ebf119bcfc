//! Legal rook move generation.
//!
//! Rooks pinned diagonally cannot move; rooks pinned along a rank or file
//! slide only along that line.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::MoveMasks;
use crate::move_generation::legal_move_shared::{push_targets, restrict_to_pin};
use crate::moves::move_descriptions::Move;
use crate::moves::slider_attacks::rook_attacks;

pub fn generate_rook_moves(game_state: &GameState, masks: &MoveMasks, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let rooks = game_state.piece_bitboard(side, PieceKind::Rook);
    generate_orthogonal_slides(game_state, masks, rooks, out);
}

pub(crate) fn generate_orthogonal_slides(
    game_state: &GameState,
    masks: &MoveMasks,
    pieces: Bitboard,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];

    let mut sliders = pieces & !masks.pin_dg;
    while sliders != 0 {
        let from = sliders.trailing_zeros() as Square;
        let targets = rook_attacks(from, game_state.occupancy_all) & !own_occ & masks.check_mask;
        push_targets(out, from, restrict_to_pin(from, targets, masks.pin_hv), enemy_occ);
        sliders &= sliders - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::generate_rook_moves;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::MoveMasks;
    use crate::moves::move_descriptions::Move;

    fn rook_moves(fen: &str) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let masks = MoveMasks::for_side_to_move(&game);
        let mut out = Vec::new();
        generate_rook_moves(&game, &masks, &mut out);
        out
    }

    #[test]
    fn lone_rook_sees_fourteen_squares() {
        // Rook d4, kings tucked away on h1/h8.
        assert_eq!(rook_moves("7k/8/8/8/3R4/8/8/7K w - - 0 1").len(), 14);
    }

    #[test]
    fn rook_pinned_on_file_slides_along_it() {
        let moves = rook_moves("4r1k1/8/8/8/4R3/8/8/4K3 w - - 0 1");
        // e2, e3, e5, e6, e7 and the capture on e8.
        assert_eq!(moves.len(), 6);
        assert_eq!(moves.iter().filter(|mv| mv.is_capture()).count(), 1);
    }

    #[test]
    fn diagonally_pinned_rook_cannot_move() {
        assert!(rook_moves("6k1/8/8/b7/8/8/3R4/4K3 w - - 0 1").is_empty());
    }
}
