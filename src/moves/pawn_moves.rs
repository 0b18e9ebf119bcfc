//! Pawn geometry: per-square capture tables plus set-wise shifts used by the
//! seen-square scan and the push generators.

use crate::game_state::chess_types::*;

pub const LIGHT_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(1);
pub const DARK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(-1);

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

/// Every square attacked by a set of `color` pawns.
#[inline]
pub const fn pawn_attacks_set(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::Light => ((pawns & !FILE_A) << 7) | ((pawns & !FILE_H) << 9),
        Color::Dark => ((pawns & !FILE_A) >> 9) | ((pawns & !FILE_H) >> 7),
    }
}

/// Shift a set of `color` pawns one rank forward.
#[inline]
pub const fn pawn_push(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::Light => pawns << 8,
        Color::Dark => pawns >> 8,
    }
}

/// Rank a pawn of `color` double-pushes from.
#[inline]
pub const fn pawn_start_rank(color: Color) -> Bitboard {
    match color {
        Color::Light => RANK_2,
        Color::Dark => RANK_7,
    }
}

/// Rank a pawn of `color` promotes from (one step before the last rank).
#[inline]
pub const fn pawn_promotion_source_rank(color: Color) -> Bitboard {
    match color {
        Color::Light => RANK_7,
        Color::Dark => RANK_2,
    }
}

const fn generate_pawn_attacks(rank_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32 + rank_step;
        let mut attacks = 0u64;

        if rank >= 0 && rank < 8 {
            if file > 0 {
                attacks |= 1u64 << (rank * 8 + file - 1);
            }
            if file < 7 {
                attacks |= 1u64 << (rank * 8 + file + 1);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}
