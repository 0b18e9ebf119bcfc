//! Short algebraic move text (`Nbd2`, `exd6`, `e8=Q+`, `O-O-O`).
//!
//! Text is matched structurally against the legal moves of the position:
//! piece letter, optional file/rank disambiguation, destination, and
//! promotion piece. Check, mate and annotation suffixes are ignored.

use crate::chess_errors::ChessError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::{Move, FLAG_KING_CASTLE, FLAG_QUEEN_CASTLE};
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Default)]
struct ShortMoveText {
    piece: Option<PieceKind>,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
    promotion: Option<PieceKind>,
}

pub fn short_algebraic_to_move(text: &str, game_state: &GameState) -> Result<Move, ChessError> {
    let trimmed = text.trim().trim_end_matches(['+', '#', '!', '?']);
    let moves = legal_moves(game_state);

    let castle_flag = match trimmed {
        "O-O" | "0-0" => Some(FLAG_KING_CASTLE),
        "O-O-O" | "0-0-0" => Some(FLAG_QUEEN_CASTLE),
        _ => None,
    };
    if let Some(flag) = castle_flag {
        return moves
            .into_iter()
            .find(|mv| mv.flags() == flag)
            .ok_or_else(|| ChessError::move_text(text, "castling is not legal"));
    }

    let parsed = parse_short_move(trimmed).ok_or_else(|| ChessError::move_text(text, "unrecognized move text"))?;
    let piece = parsed.piece.unwrap_or(PieceKind::Pawn);
    let side = game_state.side_to_move;

    let mut matches = moves.into_iter().filter(|mv| {
        mv.to() == parsed.to
            && !mv.is_castle()
            && game_state.piece_on(side, mv.from()) == Some(piece)
            && parsed.from_file.map_or(true, |file| mv.from() % 8 == file)
            && parsed.from_rank.map_or(true, |rank| mv.from() / 8 == rank)
            && mv.promotion_piece() == parsed.promotion
    });

    match (matches.next(), matches.next()) {
        (Some(mv), None) => Ok(mv),
        (None, _) => Err(ChessError::move_text(text, "no matching legal move")),
        (Some(_), Some(_)) => Err(ChessError::move_text(text, "ambiguous move")),
    }
}

/// Play a sequence of short algebraic moves from `start`, returning the moves
/// and the final position.
pub fn short_algebraic_line_to_moves(
    line: &[&str],
    start: &GameState,
) -> Result<(Vec<Move>, GameState), ChessError> {
    let mut position = start.clone();
    let mut moves = Vec::with_capacity(line.len());
    for text in line {
        let mv = short_algebraic_to_move(text, &position)?;
        position = apply_move(&position, mv)?;
        moves.push(mv);
    }
    Ok((moves, position))
}

fn parse_short_move(text: &str) -> Option<ShortMoveText> {
    if !text.is_ascii() {
        return None;
    }
    let mut body = text;
    let mut parsed = ShortMoveText::default();

    if let Some((head, promo)) = body.split_once('=') {
        parsed.promotion = Some(promotion_piece(promo)?);
        body = head;
    } else if let Some(last) = body.chars().last().filter(|ch| "NBRQ".contains(*ch)) {
        if body.len() > 2 {
            parsed.promotion = Some(promotion_piece(&last.to_string())?);
            body = &body[..body.len() - 1];
        }
    }

    if let Some(first) = body.chars().next().filter(|ch| "NBRQK".contains(*ch)) {
        parsed.piece = Some(match first {
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            _ => PieceKind::King,
        });
        body = &body[1..];
    }

    let body: String = body.chars().filter(|&ch| ch != 'x' && ch != ':' && ch != '-').collect();
    if body.len() < 2 {
        return None;
    }
    let (disambiguation, destination) = body.split_at(body.len() - 2);
    parsed.to = algebraic_to_square(destination).ok()?;

    for ch in disambiguation.chars() {
        match ch {
            'a'..='h' if parsed.from_file.is_none() => parsed.from_file = Some(ch as u8 - b'a'),
            '1'..='8' if parsed.from_rank.is_none() => parsed.from_rank = Some(ch as u8 - b'1'),
            _ => return None,
        }
    }

    Some(parsed)
}

fn promotion_piece(text: &str) -> Option<PieceKind> {
    match text {
        "N" | "n" => Some(PieceKind::Knight),
        "B" | "b" => Some(PieceKind::Bishop),
        "R" | "r" => Some(PieceKind::Rook),
        "Q" | "q" => Some(PieceKind::Queen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn pawn_and_piece_moves_from_start() {
        let start = GameState::new_game();
        let e4 = short_algebraic_to_move("e4", &start).expect("e4 is legal");
        assert_eq!((e4.from(), e4.to()), (12, 28));
        let nf3 = short_algebraic_to_move("Nf3", &start).expect("Nf3 is legal");
        assert_eq!((nf3.from(), nf3.to()), (6, 21));
    }

    #[test]
    fn disambiguation_by_file_and_rank() {
        // Knights on b1 and f3 can both reach d2.
        let g = game("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1");
        assert!(short_algebraic_to_move("Nd2", &g).is_err());
        assert_eq!(short_algebraic_to_move("Nbd2", &g).map(|mv| mv.from()), Ok(1));
        assert_eq!(short_algebraic_to_move("N3d2", &g).map(|mv| mv.from()), Ok(21));
    }

    #[test]
    fn captures_and_en_passant() {
        let g = game("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 2");
        let mv = short_algebraic_to_move("dxe6", &g).expect("en passant is legal");
        assert!(mv.is_en_passant());
    }

    #[test]
    fn promotion_suffixes() {
        let g = game("3r3k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let push = short_algebraic_to_move("e8=Q+", &g).expect("e8=Q is legal");
        assert_eq!(push.promotion_piece(), Some(PieceKind::Queen));
        assert!(!push.is_capture());
        let capture = short_algebraic_to_move("exd8N", &g).expect("exd8=N is legal");
        assert_eq!(capture.promotion_piece(), Some(PieceKind::Knight));
        assert!(capture.is_capture());
    }

    #[test]
    fn castling_tokens() {
        let g = game("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        assert_eq!(short_algebraic_to_move("O-O", &g).map(|mv| mv.to()), Ok(62));
        assert_eq!(short_algebraic_to_move("O-O-O", &g).map(|mv| mv.to()), Ok(58));
        let no_rights = game("r3k2r/8/8/8/8/8/8/R3K2R b - - 0 1");
        assert!(short_algebraic_to_move("O-O", &no_rights).is_err());
    }

    #[test]
    fn line_of_moves_reaches_fools_mate() {
        let (moves, end) = short_algebraic_line_to_moves(&["f3", "e5", "g4", "Qh4#"], &GameState::new_game())
            .expect("fool's mate line is legal");
        assert_eq!(moves.len(), 4);
        assert!(legal_moves(&end).is_empty());
    }
}
