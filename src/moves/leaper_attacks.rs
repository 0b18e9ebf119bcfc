//! Fixed-offset attack tables for knights and kings.

use crate::game_state::chess_types::{Bitboard, Square};

const KNIGHT_STEPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KNIGHT_ATTACKS: [u64; 64] = generate_step_attacks(&KNIGHT_STEPS);
pub const KING_ATTACKS: [u64; 64] = generate_step_attacks(&KING_STEPS);

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

const fn generate_step_attacks(steps: &[(i32, i32); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < 8 {
            let (file_step, rank_step) = steps[i];
            attacks |= set_if_valid(file + file_step, rank + rank_step);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << (rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::{king_attacks, knight_attacks};

    #[test]
    fn knight_attack_counts_respect_edges() {
        assert_eq!(knight_attacks(27).count_ones(), 8); // d4
        assert_eq!(knight_attacks(0).count_ones(), 2); // a1
        assert_eq!(knight_attacks(7), (1u64 << 13) | (1u64 << 22)); // h1 -> f2, g3
    }

    #[test]
    fn king_attacks_do_not_wrap_files() {
        assert_eq!(king_attacks(27).count_ones(), 8);
        assert_eq!(king_attacks(7).count_ones(), 3);
        assert_eq!(king_attacks(8) & (1u64 << 7), 0); // a2 never touches h1
    }
}
