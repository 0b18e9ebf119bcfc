use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::MoveMasks;
use crate::move_generation::legal_move_shared::{push_promotions, restrict_to_pin};
use crate::moves::move_descriptions::{
    Move, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT, FLAG_QUIET,
};
use crate::moves::pawn_moves::{pawn_attacks, pawn_promotion_source_rank, pawn_push, pawn_start_rank};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

/// Pushes and captures, promoting pawns first. En passant is generated
/// separately at the end of the move list.
pub fn generate_pawn_moves(game_state: &GameState, masks: &MoveMasks, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let pawns = game_state.piece_bitboard(side, PieceKind::Pawn);
    let promotion_rank = pawn_promotion_source_rank(side);

    let mut promoting = pawns & promotion_rank;
    while promoting != 0 {
        let from = promoting.trailing_zeros() as Square;
        let targets = pawn_targets(game_state, masks, from);
        push_promotions(out, from, targets.pushes | targets.captures, targets.enemy_occ);
        promoting &= promoting - 1;
    }

    let mut regular = pawns & !promotion_rank;
    while regular != 0 {
        let from = regular.trailing_zeros() as Square;
        let targets = pawn_targets(game_state, masks, from);

        let mut pushes = targets.pushes;
        while pushes != 0 {
            let to = pushes.trailing_zeros() as Square;
            let flags = if from.abs_diff(to) == 16 {
                FLAG_DOUBLE_PAWN_PUSH
            } else {
                FLAG_QUIET
            };
            out.push(Move::new(from, to, flags));
            pushes &= pushes - 1;
        }

        let mut captures = targets.captures;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            out.push(Move::new(from, to, FLAG_CAPTURE));
            captures &= captures - 1;
        }

        regular &= regular - 1;
    }
}

/// En-passant captures onto the current target square.
///
/// Legality is decided by replaying the capture on a scratch occupancy and
/// looking for an enemy slider that would then reach the king. This covers
/// the rank pin where both pawns leave the king's rank at once.
pub fn generate_en_passant_moves(game_state: &GameState, masks: &MoveMasks, out: &mut Vec<Move>) {
    let Some(target) = game_state.en_passant_square else {
        return;
    };
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let Some(king_sq) = game_state.king_square(side) else {
        return;
    };

    let captured = (target as i16 - side.pawn_push_offset() as i16) as Square;
    let target_bit = square_bit(target);
    let captured_bit = square_bit(captured);
    if masks.check_mask & (target_bit | captured_bit) == 0 {
        return;
    }

    let enemy_queens = game_state.piece_bitboard(enemy, PieceKind::Queen);
    let enemy_orthogonal = game_state.piece_bitboard(enemy, PieceKind::Rook) | enemy_queens;
    let enemy_diagonal = game_state.piece_bitboard(enemy, PieceKind::Bishop) | enemy_queens;

    let mut capturers = pawn_attacks(enemy, target) & game_state.piece_bitboard(side, PieceKind::Pawn);
    while capturers != 0 {
        let from = capturers.trailing_zeros() as Square;
        capturers &= capturers - 1;
        let from_bit = square_bit(from);

        if masks.pin_hv & from_bit != 0 {
            continue;
        }
        if masks.pin_dg & from_bit != 0 && masks.pin_dg & target_bit == 0 {
            continue;
        }

        let occupancy = (game_state.occupancy_all ^ from_bit ^ captured_bit) | target_bit;
        if rook_attacks(king_sq, occupancy) & enemy_orthogonal != 0
            || bishop_attacks(king_sq, occupancy) & enemy_diagonal != 0
        {
            continue;
        }

        out.push(Move::new(from, target, FLAG_EN_PASSANT));
    }
}

struct PawnTargets {
    pushes: Bitboard,
    captures: Bitboard,
    enemy_occ: Bitboard,
}

fn pawn_targets(game_state: &GameState, masks: &MoveMasks, from: Square) -> PawnTargets {
    let side = game_state.side_to_move;
    let from_bit = square_bit(from);
    let empty = !game_state.occupancy_all;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];

    let single = pawn_push(side, from_bit) & empty;
    let double = pawn_push(side, single & pawn_push(side, pawn_start_rank(side))) & empty;
    let mut pushes = (single | double) & masks.check_mask;
    let mut captures = pawn_attacks(side, from) & enemy_occ & masks.check_mask;

    // A pawn pinned along a rank/file may only push along it; a diagonally
    // pinned pawn may only capture along its diagonal.
    if masks.pin_hv & from_bit != 0 {
        captures = 0;
        pushes = restrict_to_pin(from, pushes, masks.pin_hv);
    }
    if masks.pin_dg & from_bit != 0 {
        pushes = 0;
        captures = restrict_to_pin(from, captures, masks.pin_dg);
    }

    PawnTargets {
        pushes,
        captures,
        enemy_occ,
    }
}
