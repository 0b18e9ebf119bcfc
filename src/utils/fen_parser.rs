//! FEN-to-GameState parser.
//!
//! Builds a complete position from a Forsyth-Edwards Notation string:
//! piece bitboards, rights, clocks, occupancies, hash, and a repetition
//! multiset seeded with the parsed position. History starts empty.

use crate::chess_errors::ChessError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::{algebraic_to_square, square_name};

pub fn parse_fen(fen: &str) -> Result<GameState, ChessError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    if let Some(target) = game_state.en_passant_square {
        validate_en_passant_target(&game_state, target)?;
    }
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("halfmove clock '{halfmove_part}'")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("fullmove number '{fullmove_part}'")))?;

    game_state.finish_setup();
    Ok(game_state)
}

fn invalid(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(reason.into())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), ChessError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("empty-square count '{ch}'")));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, piece) =
                piece_from_fen_char(ch).ok_or_else(|| invalid(format!("piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid(format!("rank '{rank_str}' has too many files")));
            }

            game_state.pieces[color.index()][piece.index()] |= 1u64 << (board_rank * 8 + file);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank '{rank_str}' does not span 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(format!("side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => return Err(invalid(format!("castling rights character '{ch}'"))),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, ChessError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    if square_bit(square) & (RANK_3 | RANK_6) == 0 {
        return Err(invalid(format!("en-passant square '{en_passant_part}' is not on rank 3 or 6")));
    }
    Ok(Some(square))
}

/// The target must be behind a pawn of the side that just moved, on the
/// rank that side's double push passes over, and empty.
fn validate_en_passant_target(game_state: &GameState, target: Square) -> Result<(), ChessError> {
    let name = square_name(target);
    let (expected_rank, pusher_square) = match game_state.side_to_move {
        Color::Light => (RANK_6, target - 8),
        Color::Dark => (RANK_3, target + 8),
    };
    if square_bit(target) & expected_rank == 0 {
        return Err(invalid(format!("en-passant square '{name}' is on the wrong rank for the side to move")));
    }
    if game_state.piece_at(target).is_some() {
        return Err(invalid(format!("en-passant square '{name}' is occupied")));
    }
    let pusher = game_state.side_to_move.opposite();
    if game_state.piece_on(pusher, pusher_square) != Some(PieceKind::Pawn) {
        return Err(invalid(format!("no double-pushed pawn behind en-passant square '{name}'")));
    }
    Ok(())
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}
