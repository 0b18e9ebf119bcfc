//! Fixed-size feature planes and the legal-action mask.
//!
//! Features are 111 planes of 64 squares (bit = rank * 8 + file):
//!
//! - planes 0-3: castling rights, white queen-side, white king-side, black
//!   queen-side, black king-side (each plane all ones or all zeros)
//! - plane 4: all ones when white is to move
//! - plane 5: one-hot half-move clock, clamped to 63
//! - plane 6: board edge (ranks 1 and 8, files a and h)
//! - planes 7-110: eight blocks of 13 planes, the current position then
//!   the seven most recent pre-move snapshots
//!
//! Each block holds the side to move's pieces (pawn, rook, knight, bishop,
//! queen, king), the opponent's pieces in the same order, and a plane that
//! is all ones when the block's position has already occurred.

use crate::chess_errors::ChessError;
use crate::encoding::action_encoding::{move_to_action, ACTION_SPACE_SIZE};
use crate::game_state::chess_rules::HISTORY_LENGTH;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;

pub const HEADER_PLANES: usize = 7;
pub const PLANES_PER_BLOCK: usize = 13;
pub const FEATURE_PLANES: usize = HEADER_PLANES + PLANES_PER_BLOCK * (HISTORY_LENGTH + 1);
pub const FEATURE_SIZE: usize = FEATURE_PLANES * 64;

const EDGE_SQUARES: Bitboard = RANK_1 | RANK_8 | FILE_A | FILE_H;

/// Plane order of pieces within one side's half of a block.
const PLANE_PIECE_ORDER: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
];

const CASTLING_PLANE_ORDER: [CastlingRights; 4] = [
    CASTLE_LIGHT_QUEENSIDE,
    CASTLE_LIGHT_KINGSIDE,
    CASTLE_DARK_QUEENSIDE,
    CASTLE_DARK_KINGSIDE,
];

struct FeaturePlanes {
    bits: Vec<bool>,
}

impl FeaturePlanes {
    fn new() -> Self {
        Self {
            bits: vec![false; FEATURE_SIZE],
        }
    }

    fn set_board(&mut self, plane: usize, mut board: Bitboard) {
        let base = plane * 64;
        while board != 0 {
            self.bits[base + board.trailing_zeros() as usize] = true;
            board &= board - 1;
        }
    }

    fn fill(&mut self, plane: usize, value: bool) {
        if value {
            self.set_board(plane, ALL_SQUARES);
        }
    }
}

/// Feature vector of `game_state` and its snapshot history.
pub fn encode_features(game_state: &GameState) -> Vec<bool> {
    let mut planes = FeaturePlanes::new();
    let own = game_state.side_to_move;

    for (plane, right) in CASTLING_PLANE_ORDER.into_iter().enumerate() {
        planes.fill(plane, game_state.has_castling_right(right));
    }
    planes.fill(4, own == Color::Light);
    planes.set_board(5, square_bit(game_state.halfmove_clock.min(63) as Square));
    planes.set_board(6, EDGE_SQUARES);

    let current_repeated = game_state.repetition_count(game_state.zobrist_key) >= 2;
    encode_block(
        &mut planes,
        0,
        own,
        &game_state.pieces,
        game_state.en_passant_board(),
        game_state.side_to_move,
        current_repeated,
    );

    for (age, snapshot) in game_state.history.iter().enumerate() {
        let repeated = game_state.repetition_count(snapshot.position_hash) >= 2;
        encode_block(
            &mut planes,
            age + 1,
            own,
            &snapshot.pieces,
            snapshot.en_passant_board,
            snapshot.side_to_move,
            repeated,
        );
    }

    planes.bits
}

fn encode_block(
    planes: &mut FeaturePlanes,
    block: usize,
    own: Color,
    pieces: &[[u64; 6]; 2],
    en_passant_board: Bitboard,
    snapshot_side: Color,
    repeated: bool,
) {
    let base = HEADER_PLANES + block * PLANES_PER_BLOCK;
    // The double-pushed pawn shows up again on the square it passed over.
    let double_pusher = snapshot_side.opposite();

    for (half, color) in [own, own.opposite()].into_iter().enumerate() {
        for (offset, piece) in PLANE_PIECE_ORDER.into_iter().enumerate() {
            let mut board = pieces[color.index()][piece.index()];
            if piece == PieceKind::Pawn && color == double_pusher {
                board |= en_passant_board;
            }
            planes.set_board(base + half * 6 + offset, board);
        }
    }
    planes.fill(base + 12, repeated);
}

/// `true` at the action index of every move in `legal_moves`.
pub fn legal_action_mask(legal_moves: &[Move]) -> Result<Vec<bool>, ChessError> {
    let mut mask = vec![false; ACTION_SPACE_SIZE];
    for &mv in legal_moves {
        mask[move_to_action(mv)? as usize] = true;
    }
    Ok(mask)
}
