//! Move ↔ action-index conversion.
//!
//! An action is `source_square * 73 + plane`:
//!
//! | planes | meaning                                                     |
//! |--------|-------------------------------------------------------------|
//! | 0-55   | queen-like slide, `(distance - 1) * 8 + direction`          |
//! | 56-63  | knight jump                                                 |
//! | 64-72  | under-promotion, `64 + 3 * pawn_direction + piece` (N, B, R) |
//!
//! Pawn pushes, king steps, castles and queen promotions all use the
//! queen-like planes.

use crate::chess_errors::ChessError;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

pub const ACTION_PLANES: usize = 73;
pub const ACTION_SPACE_SIZE: usize = 64 * ACTION_PLANES;

const QUEEN_PLANES: u16 = 56;
const KNIGHT_PLANE_BASE: u16 = 56;
const UNDERPROMOTION_PLANE_BASE: u16 = 64;

/// `(file_step, rank_step)` for square offsets -9, -1, 7, -8, 8, -7, 1, 9.
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// `(file_step, rank_step)` for square offsets -10, 6, -17, 15, -15, 17, -6, 10.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const UNDERPROMOTION_PIECES: [PieceKind; 3] = [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook];

/// Geometry of an action: where a piece moves and, for under-promotion
/// planes, what it becomes. Queen promotions decode with `promotion: None`
/// and are resolved against the legal move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTarget {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

pub fn move_to_action(mv: Move) -> Result<u16, ChessError> {
    let from = mv.from();
    let to = mv.to();
    let file_step = (to % 8) as i8 - (from % 8) as i8;
    let rank_step = (to / 8) as i8 - (from / 8) as i8;

    let plane = match mv.promotion_piece() {
        Some(piece) if piece != PieceKind::Queen => underpromotion_plane(file_step, rank_step, piece),
        _ => knight_plane(file_step, rank_step).or_else(|| queen_plane(file_step, rank_step)),
    }
    .ok_or_else(|| ChessError::InvariantViolation(format!("move {mv} has no action plane")))?;

    Ok(from as u16 * ACTION_PLANES as u16 + plane)
}

/// Decode an action for `side` to move. `None` when the index is out of
/// range or the plane walks off the board from the source square.
pub fn decode_action(action: u16, side: Color) -> Option<ActionTarget> {
    if action as usize >= ACTION_SPACE_SIZE {
        return None;
    }
    let from = (action / ACTION_PLANES as u16) as Square;
    let plane = action % ACTION_PLANES as u16;

    let (file_step, rank_step, promotion) = if plane < QUEEN_PLANES {
        let (df, dr) = QUEEN_DIRECTIONS[(plane % 8) as usize];
        let distance = (plane / 8 + 1) as i8;
        (df * distance, dr * distance, None)
    } else if plane < UNDERPROMOTION_PLANE_BASE {
        let (df, dr) = KNIGHT_JUMPS[(plane - KNIGHT_PLANE_BASE) as usize];
        (df, dr, None)
    } else {
        let index = plane - UNDERPROMOTION_PLANE_BASE;
        let df = (index / 3) as i8 - 1;
        let dr = match side {
            Color::Light => 1,
            Color::Dark => -1,
        };
        (df, dr, Some(UNDERPROMOTION_PIECES[(index % 3) as usize]))
    };

    let to = offset_square(from, file_step, rank_step)?;
    Some(ActionTarget { from, to, promotion })
}

/// The legal move `action` stands for, if any.
pub fn action_to_move(action: u16, legal_moves: &[Move]) -> Option<Move> {
    legal_moves
        .iter()
        .copied()
        .find(|mv| move_to_action(*mv).is_ok_and(|encoded| encoded == action))
}

fn queen_plane(file_step: i8, rank_step: i8) -> Option<u16> {
    let distance = file_step.abs().max(rank_step.abs());
    let aligned = file_step == 0 || rank_step == 0 || file_step.abs() == rank_step.abs();
    if distance == 0 || !aligned {
        return None;
    }
    let direction = QUEEN_DIRECTIONS
        .iter()
        .position(|&step| step == (file_step.signum(), rank_step.signum()))?;
    Some((distance as u16 - 1) * 8 + direction as u16)
}

fn knight_plane(file_step: i8, rank_step: i8) -> Option<u16> {
    KNIGHT_JUMPS
        .iter()
        .position(|&jump| jump == (file_step, rank_step))
        .map(|index| KNIGHT_PLANE_BASE + index as u16)
}

fn underpromotion_plane(file_step: i8, rank_step: i8, piece: PieceKind) -> Option<u16> {
    if rank_step.abs() != 1 || file_step.abs() > 1 {
        return None;
    }
    let piece_index = UNDERPROMOTION_PIECES.iter().position(|&p| p == piece)?;
    Some(UNDERPROMOTION_PLANE_BASE + 3 * (file_step + 1) as u16 + piece_index as u16)
}

fn offset_square(from: Square, file_step: i8, rank_step: i8) -> Option<Square> {
    let file = (from % 8) as i8 + file_step;
    let rank = (from / 8) as i8 + rank_step;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank * 8 + file) as Square)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::{FLAG_DOUBLE_PAWN_PUSH, FLAG_KING_CASTLE, FLAG_QUIET};

    #[test]
    fn pawn_double_push_uses_distance_two_north() {
        // e2e4: direction index 4 (+8), distance 2 -> plane 12.
        let action = move_to_action(Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH)).expect("encodable");
        assert_eq!(action, 12 * 73 + 12);
    }

    #[test]
    fn knight_and_castle_planes() {
        // g1f3 is offset 15: knight index 3.
        assert_eq!(move_to_action(Move::new(6, 21, FLAG_QUIET)), Ok(6 * 73 + 59));
        // e1g1 is two steps east: direction 6, distance 2.
        assert_eq!(move_to_action(Move::new(4, 6, FLAG_KING_CASTLE)), Ok(4 * 73 + 14));
    }

    #[test]
    fn underpromotions_share_planes_across_colors() {
        let light = move_to_action(Move::promotion(52, 59, PieceKind::Rook, true)).expect("encodable");
        let dark = move_to_action(Move::promotion(12, 3, PieceKind::Rook, true)).expect("encodable");
        assert_eq!(light % 73, 64 + 2);
        assert_eq!(dark % 73, 64 + 2);

        let decoded = decode_action(dark, Color::Dark).expect("on board");
        assert_eq!(
            decoded,
            ActionTarget {
                from: 12,
                to: 3,
                promotion: Some(PieceKind::Rook)
            }
        );
    }

    #[test]
    fn queen_promotion_uses_the_slide_plane() {
        let action = move_to_action(Move::promotion(52, 60, PieceKind::Queen, false)).expect("encodable");
        assert_eq!(action % 73, 4);
        assert_eq!(decode_action(action, Color::Light).map(|t| t.promotion), Some(None));
    }

    #[test]
    fn off_board_actions_do_not_decode() {
        // a1 heading south-west.
        assert_eq!(decode_action(0, Color::Light), None);
        assert_eq!(decode_action(ACTION_SPACE_SIZE as u16, Color::Light), None);
    }

    #[test]
    fn every_decodable_action_reencodes_to_itself() {
        for action in 0..ACTION_SPACE_SIZE as u16 {
            let Some(target) = decode_action(action, Color::Light) else {
                continue;
            };
            let mv = match target.promotion {
                Some(piece) => Move::promotion(target.from, target.to, piece, false),
                None => Move::new(target.from, target.to, FLAG_QUIET),
            };
            assert_eq!(move_to_action(mv), Ok(action));
        }
    }
}
