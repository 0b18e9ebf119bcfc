//! Legal bishop move generation.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::MoveMasks;
use crate::move_generation::legal_move_shared::{push_targets, restrict_to_pin};
use crate::moves::move_descriptions::Move;
use crate::moves::slider_attacks::bishop_attacks;

pub fn generate_bishop_moves(game_state: &GameState, masks: &MoveMasks, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let bishops = game_state.piece_bitboard(side, PieceKind::Bishop);
    generate_diagonal_slides(game_state, masks, bishops, out);
}

pub(crate) fn generate_diagonal_slides(
    game_state: &GameState,
    masks: &MoveMasks,
    pieces: Bitboard,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];

    let mut sliders = pieces & !masks.pin_hv;
    while sliders != 0 {
        let from = sliders.trailing_zeros() as Square;
        let targets = bishop_attacks(from, game_state.occupancy_all) & !own_occ & masks.check_mask;
        push_targets(out, from, restrict_to_pin(from, targets, masks.pin_dg), enemy_occ);
        sliders &= sliders - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::MoveMasks;

    fn bishop_move_count(fen: &str) -> usize {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let masks = MoveMasks::for_side_to_move(&game);
        let mut out = Vec::new();
        generate_bishop_moves(&game, &masks, &mut out);
        out.len()
    }

    #[test]
    fn start_position_bishops_are_blocked() {
        assert_eq!(bishop_move_count("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), 0);
    }

    #[test]
    fn diagonally_pinned_bishop_stays_on_the_diagonal() {
        // Black bishop a5 pins the d2 bishop: c3, b4 and the capture on a5.
        assert_eq!(bishop_move_count("6k1/8/8/b7/8/8/3B4/4K3 w - - 0 1"), 3);
    }

    #[test]
    fn file_pinned_bishop_cannot_move() {
        assert_eq!(bishop_move_count("4r1k1/8/8/8/4B3/8/8/4K3 w - - 0 1"), 0);
    }
}
