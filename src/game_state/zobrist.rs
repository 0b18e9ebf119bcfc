//! Zobrist hashing for position identity and repetition tracking.
//!
//! Keys come from a fixed-seed `StdRng`, so hashes are stable across runs.
//! The hash covers piece placement, side to move, castling rights and
//! the en-passant file, and is recomputed from scratch after every move, so
//! two structurally identical positions always hash the same no matter which
//! move order produced them.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x5EED_C0DE_2024_0B0B;

/// Flat key layout: 768 piece-square keys, one side key, four castling-right
/// keys, eight en-passant file keys.
const PIECE_KEYS: usize = 2 * 6 * 64;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EN_PASSANT_KEYS: usize = CASTLING_KEYS + 4;
const KEY_COUNT: usize = EN_PASSANT_KEYS + 8;

static KEYS: OnceLock<Box<[u64]>> = OnceLock::new();

#[inline]
fn keys() -> &'static [u64] {
    KEYS.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        (0..KEY_COUNT).map(|_| rng.random::<u64>()).collect()
    })
}

#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    keys()[(color.index() * 6 + piece.index()) * 64 + square as usize]
}

/// Xor of one key per castling right held.
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    let keys = keys();
    (0..4)
        .filter(|bit| castling_rights & (1 << bit) != 0)
        .fold(0, |acc, bit| acc ^ keys[CASTLING_KEYS + bit])
}

#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    keys()[EN_PASSANT_KEYS + (file & 7) as usize]
}

/// Xor-in key for dark to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    keys()[SIDE_KEY]
}

/// Hash of a bare piece layout, shared by live positions and snapshots.
pub fn pieces_key(pieces: &[[u64; 6]; 2]) -> u64 {
    let mut key = 0u64;

    for color in [Color::Light, Color::Dark] {
        for piece in PieceKind::ALL {
            let mut bb = pieces[color.index()][piece.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as Square;
                key ^= piece_square_key(color, piece, sq);
                bb &= bb - 1;
            }
        }
    }

    key
}

pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = pieces_key(&game_state.pieces);

    if game_state.side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }

    key ^= castling_key(game_state.castling_rights);

    if let Some(ep_square) = game_state.en_passant_square {
        key ^= en_passant_file_key(ep_square % 8);
    }

    key
}
