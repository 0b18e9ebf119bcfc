use crate::game_state::chess_rules::HISTORY_LENGTH;
use crate::game_state::chess_types::*;

/// Immutable pre-move snapshot used for encoding and repetition lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastGameState {
    pub pieces: [[u64; 6]; 2],
    pub en_passant_board: Bitboard,
    pub side_to_move: Color,
    pub position_hash: u64,
}

impl PastGameState {
    pub fn capture(game_state: &GameState) -> Self {
        Self {
            pieces: game_state.pieces,
            en_passant_board: game_state.en_passant_board(),
            side_to_move: game_state.side_to_move,
            position_hash: game_state.zobrist_key,
        }
    }
}

/// Fixed-capacity ring of the most recent snapshots, most recent first.
#[derive(Debug, Clone, Default)]
pub struct PositionHistory {
    slots: [Option<PastGameState>; HISTORY_LENGTH],
    head: usize,
    len: usize,
}

impl PositionHistory {
    pub fn push(&mut self, snapshot: PastGameState) {
        self.head = (self.head + HISTORY_LENGTH - 1) % HISTORY_LENGTH;
        self.slots[self.head] = Some(snapshot);
        self.len = (self.len + 1).min(HISTORY_LENGTH);
    }

    /// Snapshot `age` plies back (`0` is the position before the last move).
    pub fn get(&self, age: usize) -> Option<&PastGameState> {
        if age >= self.len {
            return None;
        }
        self.slots[(self.head + age) % HISTORY_LENGTH].as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &PastGameState> + '_ {
        (0..self.len).filter_map(move |age| self.get(age))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(hash: u64) -> PastGameState {
        PastGameState {
            pieces: [[0; 6]; 2],
            en_passant_board: 0,
            side_to_move: Color::Light,
            position_hash: hash,
        }
    }

    #[test]
    fn history_keeps_most_recent_first() {
        let mut history = PositionHistory::default();
        history.push(snapshot(1));
        history.push(snapshot(2));
        history.push(snapshot(3));

        let hashes: Vec<u64> = history.iter().map(|s| s.position_hash).collect();
        assert_eq!(hashes, vec![3, 2, 1]);
    }

    #[test]
    fn history_discards_oldest_beyond_capacity() {
        let mut history = PositionHistory::default();
        for hash in 0..10u64 {
            history.push(snapshot(hash));
        }

        assert_eq!(history.len(), HISTORY_LENGTH);
        assert_eq!(history.get(0).map(|s| s.position_hash), Some(9));
        assert_eq!(history.get(HISTORY_LENGTH - 1).map(|s| s.position_hash), Some(3));
        assert!(history.get(HISTORY_LENGTH).is_none());
    }
}
