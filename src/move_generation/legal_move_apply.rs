//! State transition for a single legal move.
//!
//! The move is trusted to come from `legal_moves` for the side to move; only
//! the source-square lookup is validated. The pre-move snapshot is pushed
//! into the history ring and the resulting hash is counted in the repetition
//! multiset, which is emptied at every irreversible move.

use crate::chess_errors::ChessError;
use crate::game_state::chess_rules::{
    DARK_KINGSIDE_ROOK, DARK_QUEENSIDE_ROOK, LIGHT_KINGSIDE_ROOK, LIGHT_QUEENSIDE_ROOK,
};
use crate::game_state::past_state::PastGameState;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{Move, FLAG_KING_CASTLE};
use crate::moves::pawn_moves::pawn_attacks;

/// Apply `mv` to a copy of `game_state`.
pub fn apply_move(game_state: &GameState, mv: Move) -> Result<GameState, ChessError> {
    let mut next = game_state.clone();
    apply_move_in_place(&mut next, mv)?;
    Ok(next)
}

/// Apply `mv` to `game_state`. On error the position is left untouched.
pub fn apply_move_in_place(game_state: &mut GameState, mv: Move) -> Result<(), ChessError> {
    let from = mv.from();
    let to = mv.to();
    let mover = game_state.side_to_move;
    let enemy = mover.opposite();

    let moved_piece = game_state
        .piece_on(mover, from)
        .ok_or(ChessError::NoPieceOnSquare(from))?;
    if mv.is_castle() && moved_piece != PieceKind::King {
        return Err(ChessError::InvariantViolation(format!(
            "castle {mv} does not move a king"
        )));
    }

    game_state.history.push(PastGameState::capture(game_state));
    game_state.en_passant_square = None;

    let irreversible = if mv.is_castle() {
        apply_castle(game_state, mover, mv);
        game_state.position_hashes.clear();
        false
    } else {
        update_castling_rights(game_state, mover, moved_piece, from, to);
        let captured = move_piece(game_state, mover, enemy, moved_piece, mv);
        moved_piece == PieceKind::Pawn || captured
    };

    if irreversible {
        game_state.halfmove_clock = 0;
        game_state.position_hashes.clear();
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = enemy;
    game_state.recalc_occupancy();
    game_state.zobrist_key = compute_zobrist_key(game_state);
    *game_state.position_hashes.entry(game_state.zobrist_key).or_insert(0) += 1;

    Ok(())
}

/// Relocate the king and rook and drop both rights of the mover.
fn apply_castle(game_state: &mut GameState, mover: Color, mv: Move) {
    let king_side = mv.flags() == FLAG_KING_CASTLE;
    let (rook_from, rook_to) = match (mover, king_side) {
        (Color::Light, true) => (LIGHT_KINGSIDE_ROOK, 5),
        (Color::Light, false) => (LIGHT_QUEENSIDE_ROOK, 3),
        (Color::Dark, true) => (DARK_KINGSIDE_ROOK, 61),
        (Color::Dark, false) => (DARK_QUEENSIDE_ROOK, 59),
    };

    let pieces = &mut game_state.pieces[mover.index()];
    pieces[PieceKind::King.index()] ^= square_bit(mv.from()) | square_bit(mv.to());
    pieces[PieceKind::Rook.index()] ^= square_bit(rook_from) | square_bit(rook_to);

    game_state.castling_rights &= !castling_rights_of(mover);
}

/// Moves the piece, handling promotion, en passant and the en-passant target.
/// Returns whether an enemy piece was removed.
fn move_piece(game_state: &mut GameState, mover: Color, enemy: Color, moved_piece: PieceKind, mv: Move) -> bool {
    let from = mv.from();
    let to = mv.to();
    let to_bit = square_bit(to);

    game_state.pieces[mover.index()][moved_piece.index()] &= !square_bit(from);
    let placed = mv.promotion_piece().unwrap_or(moved_piece);
    game_state.pieces[mover.index()][placed.index()] |= to_bit;

    if mv.is_en_passant() {
        let captured = (to as i16 - mover.pawn_push_offset() as i16) as Square;
        game_state.pieces[enemy.index()][PieceKind::Pawn.index()] &= !square_bit(captured);
        return true;
    }

    if mv.is_double_push() {
        let passed = (from as i16 + mover.pawn_push_offset() as i16) as Square;
        // Only record a target an enemy pawn could actually capture on.
        if pawn_attacks(mover, passed) & game_state.piece_bitboard(enemy, PieceKind::Pawn) != 0 {
            game_state.en_passant_square = Some(passed);
        }
        return false;
    }

    let mut captured = false;
    for bitboard in game_state.pieces[enemy.index()].iter_mut() {
        if *bitboard & to_bit != 0 {
            *bitboard &= !to_bit;
            captured = true;
        }
    }
    captured
}

fn update_castling_rights(
    game_state: &mut GameState,
    mover: Color,
    moved_piece: PieceKind,
    from: Square,
    to: Square,
) {
    if moved_piece == PieceKind::King {
        game_state.castling_rights &= !castling_rights_of(mover);
    }
    if moved_piece == PieceKind::Rook {
        game_state.castling_rights &= !corner_right(from);
    }
    // A rook captured in its corner takes the opponent's right with it.
    game_state.castling_rights &= !corner_right(to);
}

const fn castling_rights_of(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}

const fn corner_right(square: Square) -> CastlingRights {
    match square {
        LIGHT_QUEENSIDE_ROOK => CASTLE_LIGHT_QUEENSIDE,
        LIGHT_KINGSIDE_ROOK => CASTLE_LIGHT_KINGSIDE,
        DARK_QUEENSIDE_ROOK => CASTLE_DARK_QUEENSIDE,
        DARK_KINGSIDE_ROOK => CASTLE_DARK_KINGSIDE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, apply_move_in_place};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{
        Move, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT, FLAG_KING_CASTLE, FLAG_QUEEN_CASTLE,
        FLAG_QUIET,
    };

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn double_push_without_adjacent_enemy_sets_no_target() {
        let next = apply_move(&GameState::new_game(), Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH))
            .expect("e2e4 should apply");
        assert_eq!(next.en_passant_square, None);
        assert_eq!(next.halfmove_clock, 0);
        assert_eq!(next.fullmove_number, 1);
        assert_eq!(next.side_to_move, Color::Dark);
        assert_eq!(next.get_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    }

    #[test]
    fn double_push_beside_enemy_pawn_sets_target() {
        let g = game("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1");
        let next = apply_move(&g, Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH)).expect("e2e4 should apply");
        assert_eq!(next.en_passant_square, Some(20));

        // The target is consumed after one ply.
        let after = apply_move(&next, Move::new(60, 59, FLAG_QUIET)).expect("king move should apply");
        assert_eq!(after.en_passant_square, None);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let g = game("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 2");
        let next = apply_move(&g, Move::new(35, 44, FLAG_EN_PASSANT)).expect("dxe6 should apply");
        assert_eq!(next.piece_at(36), None);
        assert_eq!(next.piece_at(44), Some((Color::Light, PieceKind::Pawn)));
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn castling_moves_both_pieces_and_drops_rights() {
        let g = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10");
        let short = apply_move(&g, Move::new(4, 6, FLAG_KING_CASTLE)).expect("O-O should apply");
        assert_eq!(short.piece_at(6), Some((Color::Light, PieceKind::King)));
        assert_eq!(short.piece_at(5), Some((Color::Light, PieceKind::Rook)));
        assert_eq!(short.piece_at(7), None);
        assert_eq!(short.castling_rights, CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(short.halfmove_clock, 4);
        assert_eq!(short.repetition_count(short.zobrist_key), 1);
        assert_eq!(short.position_hashes.len(), 1);

        let long = apply_move(&short, Move::new(60, 58, FLAG_QUEEN_CASTLE)).expect("O-O-O should apply");
        assert_eq!(long.piece_at(58), Some((Color::Dark, PieceKind::King)));
        assert_eq!(long.piece_at(59), Some((Color::Dark, PieceKind::Rook)));
        assert_eq!(long.castling_rights, 0);
        assert_eq!(long.fullmove_number, 11);
    }

    #[test]
    fn capturing_a_corner_rook_clears_that_right() {
        let g = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = apply_move(&g, Move::new(7, 63, FLAG_CAPTURE)).expect("Rxh8 should apply");
        assert_eq!(next.castling_rights, CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_QUEENSIDE);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let g = game("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let next = apply_move(&g, Move::promotion(52, 60, PieceKind::Knight, false)).expect("e8=N should apply");
        assert_eq!(next.piece_at(60), Some((Color::Light, PieceKind::Knight)));
        assert_eq!(next.piece_bitboard(Color::Light, PieceKind::Pawn), 0);
    }

    #[test]
    fn history_records_pre_move_snapshots() {
        let start = GameState::new_game();
        let next = apply_move(&start, Move::new(6, 21, FLAG_QUIET)).expect("Nf3 should apply");
        assert_eq!(next.history.len(), 1);
        let snapshot = next.history.get(0).expect("one snapshot");
        assert_eq!(snapshot.position_hash, start.zobrist_key);
        assert_eq!(snapshot.side_to_move, Color::Light);
        assert_eq!(next.repetition_count(next.zobrist_key), 1);
        assert_eq!(next.repetition_count(start.zobrist_key), 1);
    }

    #[test]
    fn missing_source_piece_is_an_error_and_leaves_state_alone() {
        let mut g = GameState::new_game();
        let before = g.get_fen();
        let err = apply_move_in_place(&mut g, Move::new(28, 36, FLAG_QUIET)).expect_err("e4 is empty");
        assert_eq!(err, ChessError::NoPieceOnSquare(28));
        assert_eq!(g.get_fen(), before);
        assert!(g.history.is_empty());
    }
}
