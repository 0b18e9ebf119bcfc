//! Action-integer environment around a [`GameState`].
//!
//! The caller drives an episode with `step(action)` and reads the result
//! with `observe()`. Legal moves and the outcome are recomputed once per
//! step and cached until the next one.

use tracing::{debug, info, warn};

use crate::chess_errors::ChessError;
use crate::encoding::action_encoding::{action_to_move, move_to_action};
use crate::encoding::observation::{encode_features, legal_action_mask};
use crate::env::env_config::EnvConfig;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move_in_place;
use crate::move_generation::legal_move_generator::{legal_moves, validate_kings};
use crate::moves::move_descriptions::Move;
use crate::rules::termination::{game_outcome, GameOutcome};
use crate::utils::short_algebraic::short_algebraic_to_move;

/// Everything an agent sees after a step.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// 7104 feature bits.
    pub features: Vec<bool>,
    /// 4672 action bits, set for each legal action.
    pub legal_mask: Vec<bool>,
    pub white_reward: f32,
    pub black_reward: f32,
    pub terminated: bool,
}

#[derive(Debug, Clone)]
pub struct ChessEnv {
    state: GameState,
    config: EnvConfig,
    legal: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Default for ChessEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessEnv {
    /// Standard starting position with default limits.
    pub fn new() -> Self {
        Self::build(GameState::new_game(), EnvConfig::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Self::with_config(GameState::from_fen(fen)?, EnvConfig::default())
    }

    /// Fails when either side does not have exactly one king.
    pub fn with_config(state: GameState, config: EnvConfig) -> Result<Self, ChessError> {
        validate_kings(&state)?;
        Ok(Self::build(state, config))
    }

    fn build(state: GameState, config: EnvConfig) -> Self {
        let mut env = Self {
            state,
            config,
            legal: Vec::new(),
            outcome: None,
        };
        env.refresh();
        env
    }

    /// Back to the starting position, keeping the configuration.
    pub fn reset(&mut self) {
        self.state = GameState::new_game();
        self.refresh();
    }

    /// Play the legal move encoded by `action`.
    pub fn step(&mut self, action: u16) -> Result<(), ChessError> {
        self.ensure_running()?;
        let Some(mv) = action_to_move(action, &self.legal) else {
            warn!(action, fen = %self.state.get_fen(), "rejected action outside the legal set");
            return Err(ChessError::IllegalAction(action));
        };
        self.play(mv, action)
    }

    /// Play `mv`, which must be one of [`legal_moves`](Self::legal_moves).
    pub fn step_move(&mut self, mv: Move) -> Result<(), ChessError> {
        self.ensure_running()?;
        if !self.legal.contains(&mv) {
            warn!(%mv, fen = %self.state.get_fen(), "rejected move outside the legal set");
            return Err(ChessError::move_text(&mv.to_string(), "not a legal move"));
        }
        let action = move_to_action(mv)?;
        self.play(mv, action)
    }

    /// Play a move given in short algebraic notation.
    pub fn step_algebraic(&mut self, text: &str) -> Result<(), ChessError> {
        self.ensure_running()?;
        let mv = short_algebraic_to_move(text, &self.state)?;
        let action = move_to_action(mv)?;
        self.play(mv, action)
    }

    pub fn observe(&self) -> Result<Observation, ChessError> {
        let (white_reward, black_reward) = self.outcome.map_or((0.0, 0.0), GameOutcome::rewards);
        Ok(Observation {
            features: encode_features(&self.state),
            legal_mask: legal_action_mask(&self.legal)?,
            white_reward,
            black_reward,
            terminated: self.outcome.is_some(),
        })
    }

    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    pub fn legal_actions(&self) -> Result<Vec<u16>, ChessError> {
        self.legal.iter().map(|&mv| move_to_action(mv)).collect()
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn fen(&self) -> String {
        self.state.get_fen()
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }

    fn ensure_running(&self) -> Result<(), ChessError> {
        match self.outcome {
            Some(outcome) => Err(ChessError::InvariantViolation(format!(
                "episode already ended: {outcome}"
            ))),
            None => Ok(()),
        }
    }

    fn play(&mut self, mv: Move, action: u16) -> Result<(), ChessError> {
        let side = self.state.side_to_move;
        apply_move_in_place(&mut self.state, mv)?;
        debug!(action, %mv, ?side, halfmove = self.state.halfmove_clock, "step");

        self.refresh();
        if let Some(outcome) = self.outcome {
            let (white_reward, black_reward) = outcome.rewards();
            info!(
                %outcome,
                white_reward,
                black_reward,
                fullmove = self.state.fullmove_number,
                "episode terminated"
            );
        }
        Ok(())
    }

    fn refresh(&mut self) {
        self.legal = legal_moves(&self.state);
        self.outcome = game_outcome(&self.state, &self.legal, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::action_encoding::ACTION_SPACE_SIZE;
    use crate::encoding::observation::FEATURE_SIZE;
    use crate::game_state::chess_types::Color;

    #[test]
    fn fresh_environment_observation() {
        let env = ChessEnv::new();
        let obs = env.observe().expect("observation should encode");
        assert_eq!(obs.features.len(), FEATURE_SIZE);
        assert_eq!(obs.legal_mask.len(), ACTION_SPACE_SIZE);
        assert_eq!(obs.legal_mask.iter().filter(|bit| **bit).count(), 20);
        assert!(!obs.terminated);
        assert_eq!((obs.white_reward, obs.black_reward), (0.0, 0.0));
    }

    #[test]
    fn illegal_action_is_rejected_without_changing_state() {
        let mut env = ChessEnv::new();
        let before = env.fen();
        // a1 rook sliding north one square is blocked by the a2 pawn.
        let err = env.step(4).expect_err("a1a2 is not legal");
        assert_eq!(err, ChessError::IllegalAction(4));
        assert_eq!(env.fen(), before);
    }

    #[test]
    fn fools_mate_through_actions() {
        let mut env = ChessEnv::new();
        for text in ["f3", "e5", "g4", "Qh4#"] {
            let mv = short_algebraic_to_move(text, env.state()).expect("line is legal");
            let action = move_to_action(mv).expect("encodable");
            env.step(action).expect("action is legal");
        }

        assert_eq!(env.outcome(), Some(GameOutcome::Checkmate { winner: Color::Dark }));
        let obs = env.observe().expect("observation should encode");
        assert!(obs.terminated);
        assert_eq!((obs.white_reward, obs.black_reward), (-1.0, 1.0));
        assert!(obs.legal_mask.iter().all(|bit| !bit));
        assert!(env.step(0).is_err());
    }

    #[test]
    fn step_move_accepts_only_legal_moves() {
        let mut env = ChessEnv::new();
        let castle = Move::new(4, 6, crate::moves::move_descriptions::FLAG_KING_CASTLE);
        assert!(env.step_move(castle).is_err());

        let push = env
            .legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.is_double_push() && mv.from() == 12)
            .expect("e2e4 is legal");
        env.step_move(push).expect("legal move applies");
        assert_eq!(env.state().side_to_move, Color::Dark);
        assert_eq!(env.state().history.len(), 1);
    }

    #[test]
    fn missing_king_is_rejected_instead_of_stalemate() {
        let err = ChessEnv::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1").expect_err("white has no king");
        assert!(matches!(err, ChessError::MoveGeneration(_)));
        let two_kings = GameState::from_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1").expect("FEN should parse");
        assert!(ChessEnv::with_config(two_kings, EnvConfig::default()).is_err());
    }

    #[test]
    fn knight_shuffle_ends_in_repetition() {
        let mut env = ChessEnv::new();
        let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8"];
        for text in shuffle.iter().chain(shuffle.iter()) {
            assert!(!env.is_terminated());
            env.step_algebraic(text).expect("shuffle is legal");
        }
        assert_eq!(env.outcome(), Some(GameOutcome::Repetition));
    }

    #[test]
    fn configured_move_cap_applies() {
        let config = EnvConfig {
            max_full_moves: 1,
            ..EnvConfig::default()
        };
        let mut env = ChessEnv::with_config(GameState::new_game(), config).expect("start position is valid");
        env.step_algebraic("e4").expect("e4 is legal");
        assert!(!env.is_terminated());
        env.step_algebraic("e5").expect("e5 is legal");
        assert_eq!(env.outcome(), Some(GameOutcome::MoveCap));
    }

    #[test]
    fn legal_actions_match_the_mask() {
        let env = ChessEnv::new();
        let obs = env.observe().expect("observation should encode");
        for action in env.legal_actions().expect("encodable") {
            assert!(obs.legal_mask[action as usize]);
        }
    }
}
