//! Round history records

use crate::core::{Move, Outcome};
use serde::{Deserialize, Serialize};

/// One resolved round. Never modified after it is appended to history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (starts at 1)
    round: u32,
    player_move: Move,
    computer_move: Move,
    outcome: Outcome,
}

impl RoundRecord {
    /// Build a record, computing the outcome from the two moves
    pub fn new(round: u32, player_move: Move, computer_move: Move) -> Self {
        RoundRecord {
            round,
            player_move,
            computer_move,
            outcome: Outcome::resolve(player_move, computer_move),
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn player_move(&self) -> Move {
        self.player_move
    }

    pub fn computer_move(&self) -> Move {
        self.computer_move
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_computes_outcome() {
        let record = RoundRecord::new(2, Move::Paper, Move::Rock);
        assert_eq!(record.round(), 2);
        assert_eq!(record.player_move(), Move::Paper);
        assert_eq!(record.computer_move(), Move::Rock);
        assert_eq!(record.outcome(), Outcome::Win);
    }
}
