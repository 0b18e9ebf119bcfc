use plum_chess_env::game_state::chess_types::*;
use plum_chess_env::move_generation::legal_move_checks::{
    checkers, is_king_in_check, seen_squares, MoveMasks,
};
use plum_chess_env::move_generation::legal_move_generator::legal_moves;
use plum_chess_env::utils::algebraic::algebraic_to_square;

fn game(fen: &str) -> GameState {
    GameState::from_fen(fen).expect("FEN should parse")
}

fn bits(squares: &[&str]) -> Bitboard {
    squares
        .iter()
        .map(|name| square_bit(algebraic_to_square(name).expect("valid square")))
        .fold(0, |acc, bit| acc | bit)
}

#[test]
fn quiet_position_has_open_masks() {
    let masks = MoveMasks::for_side_to_move(&GameState::new_game());
    assert_eq!(masks.check_mask, ALL_SQUARES);
    assert_eq!(masks.pin_hv, 0);
    assert_eq!(masks.pin_dg, 0);
    assert!(!masks.in_check());
    // Black controls all of ranks 6 and 7 from the start.
    assert_eq!(masks.enemy_seen & RANK_6, RANK_6);
}

#[test]
fn slider_check_mask_covers_the_ray_and_checker() {
    let g = game("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
    let masks = MoveMasks::for_side_to_move(&g);
    assert_eq!(masks.check_mask, bits(&["a1", "b1", "c1", "d1"]));
    assert_eq!(checkers(&g, Color::Light), bits(&["a1"]));
}

#[test]
fn knight_check_mask_is_only_the_knight() {
    let g = game("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1");
    assert_eq!(MoveMasks::for_side_to_move(&g).check_mask, bits(&["d3"]));
}

#[test]
fn double_check_leaves_only_king_moves() {
    let g = game("4k3/8/8/8/8/3n4/8/r3K3 w - - 0 1");
    let masks = MoveMasks::for_side_to_move(&g);
    assert_eq!(masks.check_mask, 0);
    let king = g.king_square(Color::Light).expect("white king");
    assert!(legal_moves(&g).iter().all(|mv| mv.from() == king));
}

#[test]
fn pin_lines_include_the_pinner() {
    let g = game("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
    let masks = MoveMasks::for_side_to_move(&g);
    assert_eq!(masks.pin_hv, bits(&["e2", "e3", "e4", "e5", "e6", "e7"]));
    assert_eq!(masks.pin_dg, 0);

    let g = game("4k3/8/8/b7/8/2N5/8/4K3 w - - 0 1");
    let masks = MoveMasks::for_side_to_move(&g);
    assert_eq!(masks.pin_dg, bits(&["a5", "b4", "c3", "d2"]));
    assert_eq!(masks.pin_hv, 0);
}

#[test]
fn two_blockers_are_not_a_pin() {
    let g = game("4k3/4r3/8/8/4P3/8/4R3/4K3 w - - 0 1");
    let masks = MoveMasks::for_side_to_move(&g);
    assert_eq!(masks.pin_hv, 0);
}

#[test]
fn king_is_transparent_to_enemy_sliders() {
    // The square behind the king on the rook's file is still seen.
    let g = game("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1");
    let seen = seen_squares(&g, Color::Dark);
    assert_ne!(seen & bits(&["e1"]), 0);
    assert!(is_king_in_check(&g, Color::Light));
    assert!(legal_moves(&g).iter().all(|mv| mv.to() != algebraic_to_square("e2").expect("valid")));
}

#[test]
fn seen_square_queries() {
    let g = GameState::new_game();
    assert_ne!(seen_squares(&g, Color::Light) & bits(&["f3"]), 0);
    assert_eq!(seen_squares(&g, Color::Light) & bits(&["e4"]), 0);
    assert_ne!(seen_squares(&g, Color::Dark) & bits(&["f6"]), 0);
}

#[test]
fn start_position_seen_squares_mirror() {
    let g = GameState::new_game();
    assert_eq!(
        seen_squares(&g, Color::Light),
        flip_vertical(seen_squares(&g, Color::Dark))
    );
}

#[test]
fn rank_pin_disappears_when_the_blocker_leaves_the_ray() {
    let pinned = game("4k3/8/8/8/8/8/8/r2NK3 w - - 0 1");
    assert_eq!(
        MoveMasks::for_side_to_move(&pinned).pin_hv,
        bits(&["a1", "b1", "c1", "d1"])
    );
    assert!(legal_moves(&pinned).iter().all(|mv| mv.from() != 3));

    let moved = game("4k3/8/8/8/8/3N4/8/r3K3 w - - 0 1");
    assert_eq!(MoveMasks::for_side_to_move(&moved).pin_hv, 0);
}
