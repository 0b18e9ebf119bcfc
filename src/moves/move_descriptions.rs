//! Packed 16-bit move record.
//!
//! Layout: bits 0-5 source square, bits 6-11 target square, bits 12-15 flag.
//! Flag values:
//!
//! | flag | meaning                 |
//! |------|-------------------------|
//! | 0    | quiet                   |
//! | 1    | double pawn push        |
//! | 2    | king-side castle        |
//! | 3    | queen-side castle       |
//! | 4    | capture                 |
//! | 5    | en-passant capture      |
//! | 8-11 | promotion to N, B, R, Q |
//! | 12-15| capture-promotion N..Q  |

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_name;

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const FLAG_SHIFT: u16 = 12;
const SQUARE_MASK: u16 = 0x3F;

pub const FLAG_QUIET: u8 = 0b0000;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 0b0001;
pub const FLAG_KING_CASTLE: u8 = 0b0010;
pub const FLAG_QUEEN_CASTLE: u8 = 0b0011;
pub const FLAG_CAPTURE: u8 = 0b0100;
pub const FLAG_EN_PASSANT: u8 = 0b0101;
pub const FLAG_PROMOTION: u8 = 0b1000;
pub const FLAG_CAPTURE_PROMOTION: u8 = 0b1100;

/// Promotion pieces in flag order (low two bits of a promotion flag).
pub const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, flags: u8) -> Self {
        Move(
            ((from as u16) & SQUARE_MASK) << FROM_SHIFT
                | ((to as u16) & SQUARE_MASK) << TO_SHIFT
                | ((flags as u16) & 0xF) << FLAG_SHIFT,
        )
    }

    /// Promotion (or capture-promotion) to `piece`. Non-promotable kinds map
    /// to a queen.
    #[inline]
    pub fn promotion(from: Square, to: Square, piece: PieceKind, capture: bool) -> Self {
        let base = if capture { FLAG_CAPTURE_PROMOTION } else { FLAG_PROMOTION };
        Move::new(from, to, base | promotion_code(piece))
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn flags(self) -> u8 {
        (self.0 >> FLAG_SHIFT) as u8
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flags() & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flags() & FLAG_PROMOTION != 0
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags() == FLAG_EN_PASSANT
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.flags() == FLAG_DOUBLE_PAWN_PUSH
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.flags(), FLAG_KING_CASTLE | FLAG_QUEEN_CASTLE)
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        if self.is_promotion() {
            Some(PROMOTION_PIECES[(self.flags() & 0b11) as usize])
        } else {
            None
        }
    }
}

#[inline]
fn promotion_code(piece: PieceKind) -> u8 {
    match piece {
        PieceKind::Knight => 0,
        PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        _ => 3,
    }
}

/// Long algebraic rendering, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from()), square_name(self.to()))?;
        if let Some(piece) = self.promotion_piece() {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_fields_into_sixteen_bits() {
        let mv = Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH);
        assert_eq!(mv.raw(), 12 | (28 << 6) | (1 << 12));
        assert_eq!(Move::from_raw(mv.raw()), mv);
        assert_eq!(mv.from(), 12);
        assert_eq!(mv.to(), 28);
        assert!(mv.is_double_push());
        assert!(!mv.is_capture());
    }

    #[test]
    fn capture_promotion_reports_both_properties() {
        let mv = Move::promotion(52, 61, PieceKind::Rook, true);
        assert_eq!(mv.flags(), 0b1110);
        assert!(mv.is_capture());
        assert!(mv.is_promotion());
        assert_eq!(mv.promotion_piece(), Some(PieceKind::Rook));
        assert_eq!(mv.to_string(), "e7f8r");
    }

    #[test]
    fn en_passant_is_a_capture_but_castles_are_not() {
        assert!(Move::new(36, 43, FLAG_EN_PASSANT).is_capture());
        assert!(Move::new(36, 43, FLAG_EN_PASSANT).is_en_passant());
        assert!(!Move::new(4, 6, FLAG_KING_CASTLE).is_capture());
        assert!(Move::new(4, 2, FLAG_QUEEN_CASTLE).is_castle());
        assert_eq!(Move::new(4, 2, FLAG_QUEEN_CASTLE).promotion_piece(), None);
    }
}
