//! Primitive chess types shared by every subsystem.
//! Squares use the little-endian rank-file mapping: `square = rank * 8 + file`,
//! so a1 is 0, h1 is 7 and h8 is 63.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::past_state::PastGameState;

/// 64-bit board mask, one bit per square.
pub type Bitboard = u64;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Square delta of a single pawn push for this color.
    #[inline]
    pub const fn pawn_push_offset(self) -> i8 {
        match self {
            Color::Light => 8,
            Color::Dark => -8,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// Compact castling rights bitmask.
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0x0F;
pub type CastlingRights = u8;

/// Board square index (`0..=63`).
pub type Square = u8;

pub const ALL_SQUARES: Bitboard = u64::MAX;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const RANK_1: Bitboard = 0xFF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_3: Bitboard = RANK_1 << 16;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_5: Bitboard = RANK_1 << 32;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

pub const LIGHT_SQUARES: Bitboard = 0x55AA_55AA_55AA_55AA;
pub const DARK_SQUARES: Bitboard = !LIGHT_SQUARES;

#[inline]
pub const fn square_bit(square: Square) -> Bitboard {
    1u64 << square
}

/// Mirror a bitboard vertically (rank 1 becomes rank 8).
#[inline]
pub const fn flip_vertical(bitboard: Bitboard) -> Bitboard {
    bitboard.swap_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_colors_match_board_geometry() {
        // a1 is a dark square, h1 is light.
        assert_ne!(DARK_SQUARES & square_bit(0), 0);
        assert_ne!(LIGHT_SQUARES & square_bit(7), 0);
        assert_eq!((LIGHT_SQUARES | DARK_SQUARES), ALL_SQUARES);
        assert_eq!(LIGHT_SQUARES.count_ones(), 32);
    }

    #[test]
    fn flip_vertical_swaps_ranks() {
        assert_eq!(flip_vertical(RANK_2), RANK_7);
        assert_eq!(flip_vertical(square_bit(4)), square_bit(60));
    }
}
