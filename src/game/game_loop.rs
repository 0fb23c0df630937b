//! Game loop implementation
//!
//! Drives a [`Navigator`] in the Playing stage from the first move to the
//! results screen, asking a player controller for each move and delivering
//! the engine's timers.

use crate::core::{RoundRecord, Verdict};
use crate::game::controller::MoveController;
use crate::game::engine::{PendingTimer, RoundEvent};
use crate::game::{Navigator, Stage};
use crate::{Result, RpsError};
use std::time::Duration;

/// Result of running a game
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Final verdict (None if the game did not complete)
    pub verdict: Option<Verdict>,
    pub player_score: u32,
    pub computer_score: u32,
    pub rounds_played: u32,
    pub history: Vec<RoundRecord>,
    pub end_reason: GameEndReason,
}

/// Reason the game loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// Every configured round was played
    Completed,
    /// The player controller stopped offering moves
    Abandoned,
}

/// Game loop manager
pub struct GameLoop<'a> {
    pub navigator: &'a mut Navigator,
}

impl<'a> GameLoop<'a> {
    pub fn new(navigator: &'a mut Navigator) -> Self {
        GameLoop { navigator }
    }

    fn ensure_playing(&self) -> Result<()> {
        if self.navigator.stage() != Stage::Playing {
            return Err(RpsError::InvalidTransition {
                stage: self.navigator.stage(),
                action: "run the game loop",
            });
        }
        Ok(())
    }

    /// Ask the player for a move and submit it
    ///
    /// Returns the reveal timer, or None if the player has no move.
    fn offer_move(&mut self, player: &mut dyn MoveController) -> Result<Option<PendingTimer>> {
        let choice = player.choose_move(&self.navigator.view());
        let Some(player_move) = choice else {
            return Ok(None);
        };

        match self.navigator.submit_move(player_move) {
            Some(RoundEvent::MoveAccepted { timer, .. }) => Ok(Some(timer)),
            other => Err(RpsError::InvalidAction(format!(
                "move {player_move} was not accepted: {other:?}"
            ))),
        }
    }

    /// Fire one timer and return the follow-up timer, if any
    ///
    /// Returns `Ok(None)` when the engine is back at rest (ready or complete).
    fn advance(
        &mut self,
        timer: PendingTimer,
        player: &mut dyn MoveController,
    ) -> Result<Option<PendingTimer>> {
        match self.navigator.fire_timer(timer)? {
            Some(RoundEvent::Resolved { record, timer }) => {
                player.on_round_resolved(&self.navigator.view(), &record);
                Ok(Some(timer))
            }
            Some(RoundEvent::Ready { .. }) | Some(RoundEvent::GameComplete { .. }) => Ok(None),
            Some(RoundEvent::MoveAccepted { .. }) | None => Err(RpsError::InvalidAction(
                format!("timer {:?} did not advance the round", timer.kind),
            )),
        }
    }

    /// Run the remaining rounds without waiting on any timer
    pub fn run_game(&mut self, player: &mut dyn MoveController) -> Result<GameResult> {
        self.ensure_playing()?;

        while !self.navigator.session().is_finished() {
            let Some(mut timer) = self.offer_move(player)? else {
                return Ok(self.abandon());
            };
            while let Some(next) = self.advance(timer, player)? {
                timer = next;
            }
        }

        self.finish(player)
    }

    /// Run the remaining rounds, sleeping through each presentation delay
    ///
    /// Dropping the returned future cancels the pending sleep; the engine
    /// state is left for the caller to tear down.
    pub async fn run_game_paced(&mut self, player: &mut dyn MoveController) -> Result<GameResult> {
        self.ensure_playing()?;

        while !self.navigator.session().is_finished() {
            let Some(mut timer) = self.offer_move(player)? else {
                return Ok(self.abandon());
            };
            loop {
                sleep(timer.delay).await;
                match self.advance(timer, player)? {
                    Some(next) => timer = next,
                    None => break,
                }
            }
        }

        sleep(self.navigator.timing().completion_delay).await;
        self.finish(player)
    }

    fn finish(&mut self, player: &mut dyn MoveController) -> Result<GameResult> {
        self.navigator.complete_game()?;
        let verdict = self.navigator.session().verdict();
        player.on_game_end(&self.navigator.view(), verdict);
        Ok(self.result(Some(verdict), GameEndReason::Completed))
    }

    fn abandon(&mut self) -> GameResult {
        self.navigator.teardown();
        self.navigator.logger().minimal("Game abandoned");
        self.result(None, GameEndReason::Abandoned)
    }

    fn result(&self, verdict: Option<Verdict>, end_reason: GameEndReason) -> GameResult {
        let session = self.navigator.session();
        GameResult {
            verdict,
            player_score: session.player_score(),
            computer_score: session.computer_score(),
            rounds_played: session.history().len() as u32,
            history: session.history().to_vec(),
            end_reason,
        }
    }
}

async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
