//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square/bitboard representations reused by FEN and move-text components.

use crate::chess_errors::ChessError;
use crate::game_state::chess_types::{Bitboard, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Algebraic name of a square index; indices are masked to `0..=63`.
#[inline]
pub fn square_name(square: Square) -> String {
    let square = square & 63;
    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    format!("{file_char}{rank_char}")
}

/// Convert a one-hot bitboard to algebraic notation.
#[inline]
pub fn bitboard_to_algebraic(bitboard: Bitboard) -> Result<String, ChessError> {
    if bitboard.count_ones() != 1 {
        return Err(ChessError::InvalidSquare(format!(
            "bitboard {bitboard:#018x} must contain exactly one set bit"
        )));
    }

    Ok(square_name(bitboard.trailing_zeros() as Square))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, bitboard_to_algebraic, square_name};

    #[test]
    fn corner_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(63), "h8");
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(bitboard_to_algebraic(0).is_err());
        assert!(bitboard_to_algebraic(0b11).is_err());
    }

    #[test]
    fn one_hot_bitboard_names_its_square() {
        assert_eq!(bitboard_to_algebraic(1u64 << 28).expect("one-hot bitboard"), "e4");
    }
}
