use std::sync::Arc;
use std::thread;

use tracing::trace;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl PerftCounts {
    fn leaf() -> Self {
        PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        }
    }

    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }

    fn record_leaf(&mut self, mv: Move, after: &GameState) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.is_en_passant() {
            self.en_passant += 1;
        }
        if mv.is_castle() {
            self.castles += 1;
        }
        if mv.is_promotion() {
            self.promotions += 1;
        }
        if is_king_in_check(after, after.side_to_move) {
            self.checks += 1;
        }
    }
}

pub fn perft<G: MoveGenerator + ?Sized>(generator: &G, game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts::leaf());
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state)? {
        perft_recurse(generator, game_state, mv, depth, &mut total)?;
    }

    Ok(total)
}

/// One worker thread per root move, each on its own copy of the position.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts::leaf());
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        let root = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = perft_recurse(generator_ref.as_ref(), &root, mv, depth, &mut local);
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle.join().map_err(|_| MoveGenerationError::WorkerPanicked)?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

/// Leaf count below each root move, in generator order.
pub fn perft_divide<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<Vec<(Move, u64)>> {
    let mut divide = Vec::new();
    if depth == 0 {
        return Ok(divide);
    }

    for mv in generator.generate_legal_moves(game_state)? {
        let mut counts = PerftCounts::default();
        perft_recurse(generator, game_state, mv, depth, &mut counts)?;
        trace!(%mv, nodes = counts.nodes, "perft divide");
        divide.push((mv, counts.nodes));
    }

    Ok(divide)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &GameState,
    mv: Move,
    depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    let next = apply_move(game_state, mv)
        .map_err(|err| MoveGenerationError::InvalidState(format!("apply_move {mv} failed: {err}")))?;

    if depth == 1 {
        counts.record_leaf(mv, &next);
        return Ok(());
    }

    for child in generator.generate_legal_moves(&next)? {
        perft_recurse(generator, &next, child, depth - 1, counts)?;
    }

    Ok(())
}
