//! The game session record
//!
//! A single `Session` lives for one game. It is owned by the
//! [`Navigator`](crate::game::Navigator) and only mutated through the
//! crate-internal methods below, so every read through the public accessors
//! sees a consistent snapshot.

use crate::core::{Move, Outcome, PlayerName, RoundRecord};
use crate::{Result, RpsError};
use serde::{Deserialize, Serialize};

/// Round count of a fresh session
pub const DEFAULT_TOTAL_ROUNDS: u32 = 3;

/// Round counts offered on the setup screen
pub const ROUND_OPTIONS: [u32; 4] = [3, 5, 7, 10];

/// Complete state of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    player_name: PlayerName,

    /// Configured number of rounds (fixed once play starts)
    total_rounds: u32,

    /// Rounds accepted so far (starts at 0)
    current_round: u32,

    player_score: u32,
    computer_score: u32,

    /// Last moves, kept for display between rounds
    player_move: Option<Move>,
    computer_move: Option<Move>,

    /// Append-only round log
    history: Vec<RoundRecord>,
}

/// Counts folded from the history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

/// Final result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    PlayerWins,
    ComputerWins,
    Tie,
}

impl Verdict {
    pub fn title(&self) -> &'static str {
        match self {
            Verdict::PlayerWins => "Congratulations!",
            Verdict::ComputerWins => "Better Luck Next Time!",
            Verdict::Tie => "It's a Tie!",
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            player_name: PlayerName::default(),
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            current_round: 0,
            player_score: 0,
            computer_score: 0,
            player_move: None,
            computer_move: None,
            history: Vec::new(),
        }
    }

    pub fn player_name(&self) -> &PlayerName {
        &self.player_name
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn computer_score(&self) -> u32 {
        self.computer_score
    }

    pub fn player_move(&self) -> Option<Move> {
        self.player_move
    }

    pub fn computer_move(&self) -> Option<Move> {
        self.computer_move
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// All configured rounds have been accepted
    pub fn is_finished(&self) -> bool {
        self.current_round >= self.total_rounds
    }

    /// A move has been accepted but the opponent has not answered yet
    pub fn has_pending_round(&self) -> bool {
        self.history.len() as u32 + 1 == self.current_round
    }

    pub(crate) fn set_player_name(&mut self, name: PlayerName) {
        self.player_name = name;
    }

    pub(crate) fn set_total_rounds(&mut self, total_rounds: u32) {
        self.total_rounds = total_rounds;
    }

    /// Accept the player's move for the next round, returning the new round number
    pub(crate) fn begin_round(&mut self, player_move: Move) -> u32 {
        self.current_round += 1;
        self.player_move = Some(player_move);
        self.computer_move = None;
        self.current_round
    }

    /// Append a resolved round and credit its outcome
    pub(crate) fn record_round(&mut self, record: RoundRecord) {
        self.computer_move = Some(record.computer_move());
        match record.outcome() {
            Outcome::Win => self.player_score += 1,
            Outcome::Lose => self.computer_score += 1,
            Outcome::Tie => {}
        }
        self.history.push(record);
    }

    pub(crate) fn clear_moves(&mut self) {
        self.player_move = None;
        self.computer_move = None;
    }

    /// Reset play state for another game, keeping the player's name
    pub(crate) fn reset_for_rematch(&mut self) {
        self.current_round = 0;
        self.player_score = 0;
        self.computer_score = 0;
        self.clear_moves();
        self.history.clear();
    }

    /// Reset every field to its default, including the name
    pub(crate) fn reset(&mut self) {
        *self = Session::new();
    }

    /// Recompute win/loss/tie counts from the history
    pub fn tally(&self) -> Tally {
        self.history
            .iter()
            .fold(Tally::default(), |mut tally, record| {
                match record.outcome() {
                    Outcome::Win => tally.wins += 1,
                    Outcome::Lose => tally.losses += 1,
                    Outcome::Tie => tally.ties += 1,
                }
                tally
            })
    }

    /// Compare scores for the results screen
    pub fn verdict(&self) -> Verdict {
        use std::cmp::Ordering;
        match self.player_score.cmp(&self.computer_score) {
            Ordering::Greater => Verdict::PlayerWins,
            Ordering::Less => Verdict::ComputerWins,
            Ordering::Equal => Verdict::Tie,
        }
    }

    /// Name shown under "Winner" on the results screen
    pub fn winner_name(&self) -> &str {
        match self.verdict() {
            Verdict::PlayerWins => self.player_name.as_str(),
            Verdict::ComputerWins => "Computer",
            Verdict::Tie => "Tie",
        }
    }

    /// One-line summary of the final score
    pub fn verdict_message(&self) -> String {
        let (p, c) = (self.player_score, self.computer_score);
        match self.verdict() {
            Verdict::PlayerWins => format!("You've won the game with a score of {p}-{c}!"),
            Verdict::ComputerWins => format!("Computer wins with a score of {c}-{p}."),
            Verdict::Tie => format!("Both you and the computer scored {p} points."),
        }
    }

    /// Verify the structural invariants of the session
    ///
    /// Returns the first violation found. A round whose move was accepted but
    /// not yet resolved is allowed to lag the history by one.
    pub fn check_invariants(&self) -> Result<()> {
        if self.current_round > self.total_rounds {
            return Err(RpsError::InvariantViolation(format!(
                "current round {} exceeds total rounds {}",
                self.current_round, self.total_rounds
            )));
        }

        let resolved = self.history.len() as u32;
        if resolved != self.current_round && !self.has_pending_round() {
            return Err(RpsError::InvariantViolation(format!(
                "history has {} rounds but current round is {}",
                resolved, self.current_round
            )));
        }

        for (idx, record) in self.history.iter().enumerate() {
            if record.round() != idx as u32 + 1 {
                return Err(RpsError::InvariantViolation(format!(
                    "history entry {} is numbered {}",
                    idx + 1,
                    record.round()
                )));
            }
        }

        let tally = self.tally();
        if tally.wins != self.player_score || tally.losses != self.computer_score {
            return Err(RpsError::InvariantViolation(format!(
                "scores {}-{} do not match history {}-{}",
                self.player_score, self.computer_score, tally.wins, tally.losses
            )));
        }

        Ok(())
    }
}
