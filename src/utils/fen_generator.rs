use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_name;

pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let en_passant = game_state
        .en_passant_square
        .map_or_else(|| "-".to_owned(), square_name);

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state),
        side_to_move,
        generate_castling_field(game_state.castling_rights),
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let ranks: Vec<String> = (0..8u8)
        .rev()
        .map(|rank| {
            let mut row = String::with_capacity(8);
            let mut gap = 0u8;
            for square in rank * 8..rank * 8 + 8 {
                let Some((color, piece)) = game_state.piece_at(square) else {
                    gap += 1;
                    continue;
                };
                if gap > 0 {
                    row.push(char::from(b'0' + gap));
                    gap = 0;
                }
                row.push(piece_to_fen_char(color, piece));
            }
            if gap > 0 {
                row.push(char::from(b'0' + gap));
            }
            row
        })
        .collect();
    ranks.join("/")
}

fn piece_to_fen_char(color: Color, piece: PieceKind) -> char {
    match color {
        Color::Light => piece.to_char().to_ascii_uppercase(),
        Color::Dark => piece.to_char(),
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CASTLE_LIGHT_KINGSIDE, 'K'),
        (CASTLE_LIGHT_QUEENSIDE, 'Q'),
        (CASTLE_DARK_KINGSIDE, 'k'),
        (CASTLE_DARK_QUEENSIDE, 'q'),
    ]
    .into_iter()
    .filter(|(right, _)| rights & right != 0)
    .map(|(_, ch)| ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}
