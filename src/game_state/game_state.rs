//! Core board state representation.
//!
//! `GameState` is the central model. It stores piece bitboards, occupancy
//! caches, turn/castling/en-passant flags, clocks, the bounded history of
//! pre-move snapshots, and the position-hash multiset used for repetition.

use rustc_hash::FxHashMap;

use crate::chess_errors::ChessError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::past_state::PositionHistory;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub zobrist_key: u64,

    // --- Repetition support ---
    pub history: PositionHistory,
    // Hashes seen since the last irreversible move, current position included.
    pub position_hashes: FxHashMap<u64, u32>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,

            history: PositionHistory::default(),
            position_hashes: FxHashMap::default(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting layout.
    pub fn new_game() -> Self {
        let mut game_state = Self::new_empty();

        game_state.pieces[Color::Light.index()] = [
            0x0000_0000_0000_FF00,
            0x0000_0000_0000_0042,
            0x0000_0000_0000_0024,
            0x0000_0000_0000_0081,
            0x0000_0000_0000_0008,
            0x0000_0000_0000_0010,
        ];
        game_state.pieces[Color::Dark.index()] = game_state.pieces[Color::Light.index()].map(flip_vertical);
        game_state.castling_rights = CASTLE_ALL;

        game_state.finish_setup();
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Recompute occupancy caches and the hash, then seed the repetition
    /// multiset with the current position.
    pub fn finish_setup(&mut self) {
        self.recalc_occupancy();
        self.zobrist_key = compute_zobrist_key(self);
        self.position_hashes.clear();
        self.position_hashes.insert(self.zobrist_key, 1);
    }

    pub fn recalc_occupancy(&mut self) {
        for color in [Color::Light, Color::Dark] {
            self.occupancy_by_color[color.index()] =
                self.pieces[color.index()].iter().copied().fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all =
            self.occupancy_by_color[Color::Light.index()] | self.occupancy_by_color[Color::Dark.index()];
    }

    #[inline]
    pub fn piece_bitboard(&self, color: Color, piece: PieceKind) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub fn en_passant_board(&self) -> Bitboard {
        self.en_passant_square.map_or(0, square_bit)
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.piece_bitboard(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    pub fn piece_on(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_bit(square);
        PieceKind::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()] & mask != 0)
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        [Color::Light, Color::Dark]
            .into_iter()
            .find_map(|color| self.piece_on(color, square).map(|piece| (color, piece)))
    }

    /// Occurrences of `hash` since the last irreversible move.
    #[inline]
    pub fn repetition_count(&self, hash: u64) -> u32 {
        self.position_hashes.get(&hash).copied().unwrap_or(0)
    }
}
