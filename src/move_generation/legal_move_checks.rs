//! Attack and legality masks derived from a position.
//!
//! Every function takes a perspective color and reads the position only.
//! `seen_squares(color)` is what `color` attacks; the check and pin masks
//! describe constraints on `color`'s own pieces.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_attacks::{king_attacks, knight_attacks};
use crate::moves::pawn_moves::{pawn_attacks, pawn_attacks_set};
use crate::moves::slider_attacks::{
    bishop_attacks, bishop_xray_attacks, rook_attacks, rook_xray_attacks, squares_between,
};

/// Masks the generator needs for the side to move, computed once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveMasks {
    pub check_mask: Bitboard,
    pub pin_hv: Bitboard,
    pub pin_dg: Bitboard,
    pub enemy_seen: Bitboard,
}

impl MoveMasks {
    pub fn for_side_to_move(game_state: &GameState) -> Self {
        let color = game_state.side_to_move;
        let check_mask = check_mask(game_state, color);
        Self {
            check_mask,
            pin_hv: pin_mask(game_state, color, check_mask, PinAxis::Orthogonal),
            pin_dg: pin_mask(game_state, color, check_mask, PinAxis::Diagonal),
            enemy_seen: seen_squares(game_state, color.opposite()),
        }
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.check_mask != ALL_SQUARES
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinAxis {
    Orthogonal,
    Diagonal,
}

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    game_state.king_square(color)
}

/// Every square attacked by `color`. The opposing king is removed from the
/// blocker set so it cannot shelter behind itself along a slider ray.
pub fn seen_squares(game_state: &GameState, color: Color) -> Bitboard {
    let enemy_king = game_state.piece_bitboard(color.opposite(), PieceKind::King);
    let occupancy = game_state.occupancy_all & !enemy_king;

    let mut seen = pawn_attacks_set(color, game_state.piece_bitboard(color, PieceKind::Pawn));

    let mut knights = game_state.piece_bitboard(color, PieceKind::Knight);
    while knights != 0 {
        seen |= knight_attacks(knights.trailing_zeros() as Square);
        knights &= knights - 1;
    }

    let queens = game_state.piece_bitboard(color, PieceKind::Queen);

    let mut diagonal = game_state.piece_bitboard(color, PieceKind::Bishop) | queens;
    while diagonal != 0 {
        seen |= bishop_attacks(diagonal.trailing_zeros() as Square, occupancy);
        diagonal &= diagonal - 1;
    }

    let mut orthogonal = game_state.piece_bitboard(color, PieceKind::Rook) | queens;
    while orthogonal != 0 {
        seen |= rook_attacks(orthogonal.trailing_zeros() as Square, occupancy);
        orthogonal &= orthogonal - 1;
    }

    let mut kings = game_state.piece_bitboard(color, PieceKind::King);
    while kings != 0 {
        seen |= king_attacks(kings.trailing_zeros() as Square);
        kings &= kings - 1;
    }

    seen
}

/// Enemy pieces currently giving check to `color`'s king.
pub fn checkers(game_state: &GameState, color: Color) -> Bitboard {
    let Some(king_sq) = king_square(game_state, color) else {
        return 0;
    };
    let enemy = color.opposite();
    let occupancy = game_state.occupancy_all;
    let queens = game_state.piece_bitboard(enemy, PieceKind::Queen);

    (pawn_attacks(color, king_sq) & game_state.piece_bitboard(enemy, PieceKind::Pawn))
        | (knight_attacks(king_sq) & game_state.piece_bitboard(enemy, PieceKind::Knight))
        | (bishop_attacks(king_sq, occupancy)
            & (game_state.piece_bitboard(enemy, PieceKind::Bishop) | queens))
        | (rook_attacks(king_sq, occupancy)
            & (game_state.piece_bitboard(enemy, PieceKind::Rook) | queens))
}

/// Squares a non-king piece of `color` may move to.
///
/// All squares without check, the checker plus the blocking segment under a
/// single check, and nothing under double check.
pub fn check_mask(game_state: &GameState, color: Color) -> Bitboard {
    let checking = checkers(game_state, color);
    match checking.count_ones() {
        0 => ALL_SQUARES,
        1 => {
            let Some(king_sq) = king_square(game_state, color) else {
                return ALL_SQUARES;
            };
            let checker_sq = checking.trailing_zeros() as Square;
            squares_between(king_sq, checker_sq) | checking
        }
        _ => 0,
    }
}

/// Rank/file pin lines of `color`'s pieces, attacker included, king excluded.
pub fn pin_mask_hv(game_state: &GameState, color: Color) -> Bitboard {
    pin_mask(game_state, color, check_mask(game_state, color), PinAxis::Orthogonal)
}

/// Diagonal pin lines of `color`'s pieces, attacker included, king excluded.
pub fn pin_mask_dg(game_state: &GameState, color: Color) -> Bitboard {
    pin_mask(game_state, color, check_mask(game_state, color), PinAxis::Diagonal)
}

fn pin_mask(game_state: &GameState, color: Color, check: Bitboard, axis: PinAxis) -> Bitboard {
    let Some(king_sq) = king_square(game_state, color) else {
        return 0;
    };
    let enemy = color.opposite();
    let occupancy = game_state.occupancy_all;
    let own = game_state.occupancy_by_color[color.index()];
    let queens = game_state.piece_bitboard(enemy, PieceKind::Queen);

    let (xray, sliders) = match axis {
        PinAxis::Orthogonal => (
            rook_xray_attacks(king_sq, occupancy),
            game_state.piece_bitboard(enemy, PieceKind::Rook) | queens,
        ),
        PinAxis::Diagonal => (
            bishop_xray_attacks(king_sq, occupancy),
            game_state.piece_bitboard(enemy, PieceKind::Bishop) | queens,
        ),
    };

    let mut pins = 0u64;
    let mut candidates = xray & sliders;
    while candidates != 0 {
        let pinner = candidates.trailing_zeros() as Square;
        candidates &= candidates - 1;

        let between = squares_between(king_sq, pinner);
        let blockers = between & occupancy;
        if blockers.count_ones() != 1 || blockers & own == 0 {
            continue;
        }

        let line = between | square_bit(pinner);
        // A line that coincides with an active check path is the check itself.
        if check != ALL_SQUARES && line & check != 0 {
            continue;
        }
        pins |= line;
    }

    pins
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    checkers(game_state, color) != 0
}
