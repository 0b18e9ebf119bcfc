use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, FLAG_CAPTURE, FLAG_QUIET, PROMOTION_PIECES};

/// Emit one move per target bit, flagged as a capture when the target holds
/// an enemy piece.
#[inline]
pub fn push_targets(out: &mut Vec<Move>, from: Square, mut targets: Bitboard, enemy_occ: Bitboard) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let flags = if enemy_occ & square_bit(to) != 0 {
            FLAG_CAPTURE
        } else {
            FLAG_QUIET
        };
        out.push(Move::new(from, to, flags));
        targets &= targets - 1;
    }
}

/// Emit the four promotion moves (knight, bishop, rook, queen) per target.
#[inline]
pub fn push_promotions(out: &mut Vec<Move>, from: Square, mut targets: Bitboard, enemy_occ: Bitboard) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let capture = enemy_occ & square_bit(to) != 0;
        for piece in PROMOTION_PIECES {
            out.push(Move::promotion(from, to, piece, capture));
        }
        targets &= targets - 1;
    }
}

/// Restrict `targets` to `pin` when the piece on `from` sits on that pin line.
#[inline]
pub fn restrict_to_pin(from: Square, targets: Bitboard, pin: Bitboard) -> Bitboard {
    if pin & square_bit(from) != 0 {
        targets & pin
    } else {
        targets
    }
}
