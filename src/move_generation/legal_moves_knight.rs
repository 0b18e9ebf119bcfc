use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::MoveMasks;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::leaper_attacks::knight_attacks;
use crate::moves::move_descriptions::Move;

pub fn generate_knight_moves(game_state: &GameState, masks: &MoveMasks, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];

    // A pinned knight can never stay on its pin line.
    let mut knights = game_state.piece_bitboard(side, PieceKind::Knight) & !(masks.pin_hv | masks.pin_dg);
    while knights != 0 {
        let from = knights.trailing_zeros() as Square;
        let targets = knight_attacks(from) & !own_occ & masks.check_mask;
        push_targets(out, from, targets, enemy_occ);
        knights &= knights - 1;
    }
}
