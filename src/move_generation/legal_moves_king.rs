//! King steps and castling.
//!
//! The king may step onto any square not held by its own side and not seen
//! by the enemy. Seen squares are computed with the king lifted off the
//! board, so stepping back along a checking ray is rejected.

use crate::game_state::chess_rules::{
    DARK_KINGSIDE_ROOK, DARK_KING_START, DARK_QUEENSIDE_ROOK, LIGHT_KINGSIDE_ROOK, LIGHT_KING_START,
    LIGHT_QUEENSIDE_ROOK,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::MoveMasks;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::leaper_attacks::king_attacks;
use crate::moves::move_descriptions::{Move, FLAG_KING_CASTLE, FLAG_QUEEN_CASTLE};

struct CastleRoute {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    must_be_empty: Bitboard,
    must_be_safe: Bitboard,
    flag: u8,
}

const LIGHT_ROUTES: [CastleRoute; 2] = [
    CastleRoute {
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: LIGHT_KING_START,
        king_to: 6,
        rook_from: LIGHT_KINGSIDE_ROOK,
        must_be_empty: (1 << 5) | (1 << 6),
        must_be_safe: (1 << 5) | (1 << 6),
        flag: FLAG_KING_CASTLE,
    },
    CastleRoute {
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: LIGHT_KING_START,
        king_to: 2,
        rook_from: LIGHT_QUEENSIDE_ROOK,
        must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
        must_be_safe: (1 << 2) | (1 << 3),
        flag: FLAG_QUEEN_CASTLE,
    },
];

const DARK_ROUTES: [CastleRoute; 2] = [
    CastleRoute {
        right: CASTLE_DARK_KINGSIDE,
        king_from: DARK_KING_START,
        king_to: 62,
        rook_from: DARK_KINGSIDE_ROOK,
        must_be_empty: (1 << 61) | (1 << 62),
        must_be_safe: (1 << 61) | (1 << 62),
        flag: FLAG_KING_CASTLE,
    },
    CastleRoute {
        right: CASTLE_DARK_QUEENSIDE,
        king_from: DARK_KING_START,
        king_to: 58,
        rook_from: DARK_QUEENSIDE_ROOK,
        must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
        must_be_safe: (1 << 58) | (1 << 59),
        flag: FLAG_QUEEN_CASTLE,
    },
];

pub fn generate_king_moves(game_state: &GameState, masks: &MoveMasks, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let Some(from) = game_state.king_square(side) else {
        return;
    };
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];

    let targets = king_attacks(from) & !own_occ & !masks.enemy_seen;
    push_targets(out, from, targets, enemy_occ);
}

/// King-side before queen-side. Castling out of, through, or into an
/// attacked square is rejected, as is castling without the rook in place.
pub fn generate_castling_moves(game_state: &GameState, masks: &MoveMasks, out: &mut Vec<Move>) {
    if masks.in_check() {
        return;
    }

    let side = game_state.side_to_move;
    let kings = game_state.piece_bitboard(side, PieceKind::King);
    let rooks = game_state.piece_bitboard(side, PieceKind::Rook);
    let routes = match side {
        Color::Light => &LIGHT_ROUTES,
        Color::Dark => &DARK_ROUTES,
    };

    for route in routes {
        if !game_state.has_castling_right(route.right)
            || kings & square_bit(route.king_from) == 0
            || rooks & square_bit(route.rook_from) == 0
            || game_state.occupancy_all & route.must_be_empty != 0
            || masks.enemy_seen & route.must_be_safe != 0
        {
            continue;
        }
        out.push(Move::new(route.king_from, route.king_to, route.flag));
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_castling_moves, generate_king_moves};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::MoveMasks;
    use crate::moves::move_descriptions::Move;

    fn moves_with(fen: &str, castling: bool) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let masks = MoveMasks::for_side_to_move(&game);
        let mut out = Vec::new();
        if castling {
            generate_castling_moves(&game, &masks, &mut out);
        } else {
            generate_king_moves(&game, &masks, &mut out);
        }
        out
    }

    #[test]
    fn king_cannot_retreat_along_checking_ray() {
        // Rook a1 checks e1; f1 stays covered through the king.
        let moves = moves_with("4k3/8/8/8/8/8/8/r3K3 w - - 0 1", false);
        let targets: Vec<_> = moves.iter().map(|mv| mv.to()).collect();
        assert!(!targets.contains(&5));
        assert!(!targets.contains(&3));
        assert!(targets.contains(&12));
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        let moves = moves_with("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", true);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].to(), 6);
        assert!(moves[0].is_castle());
        assert_eq!(moves[1].to(), 2);

        let dark = moves_with("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", true);
        let targets: Vec<_> = dark.iter().map(|mv| mv.to()).collect();
        assert_eq!(targets, vec![62, 58]);
    }

    #[test]
    fn attacked_transit_square_blocks_castling() {
        // Black rook on f8 covers f1.
        let moves = moves_with("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", true);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to(), 2);
    }

    #[test]
    fn attacked_b_file_does_not_block_queen_side() {
        let moves = moves_with("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", true);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn missing_rook_or_check_prevents_castling() {
        assert!(moves_with("4k3/8/8/8/8/8/8/4K2R w Q - 0 1", true).is_empty());
        assert!(moves_with("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1", true).is_empty());
    }
}
