//! Crate root module declarations for the Plum Chess environment.
//!
//! Exposes the bitboard rules engine (game state, attack tables, legal move
//! generation, state transition), the termination rules, the feature and
//! action encodings, and the action-integer environment built on them.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod past_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod leaper_attacks;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod rules {
    pub mod termination;
}

pub mod encoding {
    pub mod action_encoding;
    pub mod observation;
}

pub mod env {
    pub mod chess_env;
    pub mod env_config;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod short_algebraic;
}
