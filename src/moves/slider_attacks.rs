//! PEXT-indexed slider attack tables.
//!
//! For every square, the occupancy bits under the square's relevant mask are
//! compressed into a dense index (a bit-extract) that selects a precomputed
//! attack set. Rooks use 4096 entries per square and bishops 512. The x-ray
//! variants let the ray pass through the first blocker and stop on the
//! second, which is what pin detection needs.
//!
//! Tables are generated once on first use and are read-only afterwards.

use std::sync::OnceLock;

use crate::game_state::chess_types::{Bitboard, Square};

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const ROOK_TABLE_STRIDE: usize = 4096;
pub const BISHOP_TABLE_STRIDE: usize = 512;

pub const ROOK_RELEVANT_MASKS: [u64; 64] = generate_relevant_masks(&ROOK_DIRECTIONS);
pub const BISHOP_RELEVANT_MASKS: [u64; 64] = generate_relevant_masks(&BISHOP_DIRECTIONS);

/// Flat per-square arenas indexed by `square * stride + pext(occupancy, mask)`.
struct SliderTables {
    rook: Box<[u64]>,
    rook_xray: Box<[u64]>,
    bishop: Box<[u64]>,
    bishop_xray: Box<[u64]>,
    between: Box<[u64]>,
}

static TABLES: OnceLock<SliderTables> = OnceLock::new();

#[inline]
fn tables() -> &'static SliderTables {
    TABLES.get_or_init(build_tables)
}

/// Force table construction, e.g. before timing-sensitive work.
pub fn init_attack_tables() {
    let _ = tables();
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let sq = square as usize;
    tables().rook[sq * ROOK_TABLE_STRIDE + pext(occupancy, ROOK_RELEVANT_MASKS[sq]) as usize]
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let sq = square as usize;
    tables().bishop[sq * BISHOP_TABLE_STRIDE + pext(occupancy, BISHOP_RELEVANT_MASKS[sq]) as usize]
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

#[inline]
pub fn rook_xray_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let sq = square as usize;
    tables().rook_xray[sq * ROOK_TABLE_STRIDE + pext(occupancy, ROOK_RELEVANT_MASKS[sq]) as usize]
}

#[inline]
pub fn bishop_xray_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let sq = square as usize;
    tables().bishop_xray
        [sq * BISHOP_TABLE_STRIDE + pext(occupancy, BISHOP_RELEVANT_MASKS[sq]) as usize]
}

/// Squares strictly between two aligned squares; empty when not aligned.
#[inline]
pub fn squares_between(a: Square, b: Square) -> Bitboard {
    tables().between[a as usize * 64 + b as usize]
}

/// Parallel bit extract: gather the bits of `source` selected by `mask` into
/// the low bits of the result.
#[inline]
pub fn pext(source: u64, mask: u64) -> u64 {
    let mut result = 0u64;
    let mut out_bit = 1u64;
    let mut remaining = mask;
    while remaining != 0 {
        let lowest = remaining & remaining.wrapping_neg();
        if source & lowest != 0 {
            result |= out_bit;
        }
        out_bit <<= 1;
        remaining &= remaining - 1;
    }
    result
}

/// Parallel bit deposit, the inverse of [`pext`]: scatter the low bits of
/// `index` onto the set bits of `mask`.
#[inline]
pub fn pdep(index: u64, mask: u64) -> u64 {
    let mut result = 0u64;
    let mut in_bit = 1u64;
    let mut remaining = mask;
    while remaining != 0 {
        let lowest = remaining & remaining.wrapping_neg();
        if index & in_bit != 0 {
            result |= lowest;
        }
        in_bit <<= 1;
        remaining &= remaining - 1;
    }
    result
}

fn build_tables() -> SliderTables {
    let mut rook = vec![0u64; 64 * ROOK_TABLE_STRIDE];
    let mut rook_xray = vec![0u64; 64 * ROOK_TABLE_STRIDE];
    let mut bishop = vec![0u64; 64 * BISHOP_TABLE_STRIDE];
    let mut bishop_xray = vec![0u64; 64 * BISHOP_TABLE_STRIDE];

    for sq in 0..64usize {
        fill_square(
            sq,
            ROOK_RELEVANT_MASKS[sq],
            &ROOK_DIRECTIONS,
            &mut rook[sq * ROOK_TABLE_STRIDE..(sq + 1) * ROOK_TABLE_STRIDE],
            &mut rook_xray[sq * ROOK_TABLE_STRIDE..(sq + 1) * ROOK_TABLE_STRIDE],
        );
        fill_square(
            sq,
            BISHOP_RELEVANT_MASKS[sq],
            &BISHOP_DIRECTIONS,
            &mut bishop[sq * BISHOP_TABLE_STRIDE..(sq + 1) * BISHOP_TABLE_STRIDE],
            &mut bishop_xray[sq * BISHOP_TABLE_STRIDE..(sq + 1) * BISHOP_TABLE_STRIDE],
        );
    }

    SliderTables {
        rook: rook.into_boxed_slice(),
        rook_xray: rook_xray.into_boxed_slice(),
        bishop: bishop.into_boxed_slice(),
        bishop_xray: bishop_xray.into_boxed_slice(),
        between: generate_between().into_boxed_slice(),
    }
}

fn fill_square(
    sq: usize,
    mask: u64,
    directions: &[(i32, i32); 4],
    attacks: &mut [u64],
    xray: &mut [u64],
) {
    let subsets = 1usize << mask.count_ones();
    for index in 0..subsets {
        let occupancy = pdep(index as u64, mask);
        let mut normal = 0u64;
        let mut through = 0u64;
        for &(file_step, rank_step) in directions {
            normal |= trace_ray(sq as i32, file_step, rank_step, occupancy, 1);
            through |= trace_ray(sq as i32, file_step, rank_step, occupancy, 2);
        }
        attacks[index] = normal;
        xray[index] = through;
    }
}

/// Walk one direction, stopping on the `stop_at`-th occupied square
/// (inclusive) or the board edge.
fn trace_ray(square: i32, file_step: i32, rank_step: i32, occupancy: u64, stop_at: u32) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;
    let mut blockers = 0u32;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if occupancy & bit != 0 {
            blockers += 1;
            if blockers == stop_at {
                break;
            }
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

fn generate_between() -> Vec<u64> {
    let mut between = vec![0u64; 64 * 64];

    for from in 0..64i32 {
        for &(file_step, rank_step) in ROOK_DIRECTIONS.iter().chain(BISHOP_DIRECTIONS.iter()) {
            let mut file = (from % 8) + file_step;
            let mut rank = (from / 8) + rank_step;
            let mut passed = 0u64;

            while (0..8).contains(&file) && (0..8).contains(&rank) {
                let to = rank * 8 + file;
                between[from as usize * 64 + to as usize] = passed;
                passed |= 1u64 << to;
                file += file_step;
                rank += rank_step;
            }
        }
    }

    between
}

/// Ray squares whose occupancy can change the attack set: every ray square
/// except the last one before the edge, and never the origin.
const fn generate_relevant_masks(directions: &[(i32, i32); 4]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut mask = 0u64;
        let mut d = 0usize;

        while d < 4 {
            let (file_step, rank_step) = directions[d];
            let mut file = (sq % 8) as i32 + file_step;
            let mut rank = (sq / 8) as i32 + rank_step;

            while file + file_step >= 0
                && file + file_step < 8
                && rank + rank_step >= 0
                && rank + rank_step < 8
            {
                mask |= 1u64 << (rank * 8 + file);
                file += file_step;
                rank += rank_step;
            }
            d += 1;
        }

        table[sq] = mask;
        sq += 1;
    }

    table
}
