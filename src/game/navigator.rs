//! Stage navigator
//!
//! Owns the current [`Stage`], the single [`Session`] and the
//! [`RoundEngine`]. Every user-triggered transition goes through here; a
//! rejected call returns an error and leaves both stage and session as they
//! were.

use crate::core::{Move, PlayerName, Session};
use crate::game::controller::{MoveController, SessionView};
use crate::game::engine::{EngineState, PendingTimer, RoundEngine, RoundEvent, RoundTiming};
use crate::game::{GameLogger, Stage, VerbosityLevel};
use crate::{Result, RpsError};

/// Stage sequencer for one player's games
pub struct Navigator {
    stage: Stage,
    session: Session,
    engine: RoundEngine,
    logger: GameLogger,
}

impl Navigator {
    /// Create a navigator on the landing stage with a fresh session
    pub fn new(opponent: Box<dyn MoveController>) -> Self {
        Navigator {
            stage: Stage::Landing,
            session: Session::new(),
            engine: RoundEngine::new(opponent),
            logger: GameLogger::new(),
        }
    }

    pub fn with_timing(mut self, timing: RoundTiming) -> Self {
        self.engine.set_timing(timing);
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Read-only session snapshot
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView::with_logger(&self.session, &self.logger)
    }

    pub fn engine_state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn timing(&self) -> RoundTiming {
        self.engine.timing()
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    fn require(&self, expected: Stage, action: &'static str) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(RpsError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }

    fn transition(&mut self, next: Stage) {
        debug_assert!(self.stage.can_transition_to(next));
        self.logger
            .verbose(&format!("Stage: {} -> {}", self.stage, next));
        self.stage = next;
        self.logger.event("session", &self.session);
    }

    /// Leave the landing screen
    pub fn start(&mut self) -> Result<()> {
        self.require(Stage::Landing, "start a game")?;
        self.transition(Stage::NameEntry);
        Ok(())
    }

    /// Store the player's name and move on to setup
    ///
    /// A blank name is a validation error; the stage stays on name entry.
    pub fn submit_name(&mut self, name: &str) -> Result<()> {
        self.require(Stage::NameEntry, "submit a name")?;
        let name = PlayerName::parse(name)?;
        self.logger.verbose(&format!("Player name: {name}"));
        self.session.set_player_name(name);
        self.transition(Stage::Setup);
        Ok(())
    }

    /// Fix the number of rounds and start playing
    pub fn submit_round_count(&mut self, rounds: u32) -> Result<()> {
        self.require(Stage::Setup, "choose a round count")?;
        if rounds == 0 {
            return Err(RpsError::InvalidRoundCount(rounds));
        }
        self.session.set_total_rounds(rounds);
        self.engine.cancel();
        self.logger.normal(&format!(
            "{} vs Computer, best of {} rounds",
            self.session.player_name(),
            rounds
        ));
        self.transition(Stage::Playing);
        Ok(())
    }

    /// Offer a player move to the round engine
    ///
    /// Returns None when the move is ignored: wrong stage, engine busy, or
    /// all rounds played.
    pub fn submit_move(&mut self, player_move: Move) -> Option<RoundEvent> {
        if !self.stage.accepts_moves() {
            self.logger
                .verbose(&format!("Ignoring {player_move} on the {} stage", self.stage));
            return None;
        }
        let event = self
            .engine
            .submit_move(&mut self.session, player_move, &self.logger)?;
        self.logger.event("round", &event);
        Some(event)
    }

    /// Deliver a timer previously handed out by the engine
    pub fn fire_timer(&mut self, timer: PendingTimer) -> Result<Option<RoundEvent>> {
        if !self.stage.accepts_moves() {
            return Ok(None);
        }
        let event = self
            .engine
            .fire_timer(&mut self.session, timer, &self.logger)?;
        if let Some(ref event) = event {
            self.logger.event("round", event);
        }
        Ok(event)
    }

    /// Move to the results screen once the engine has finished the game
    pub fn complete_game(&mut self) -> Result<()> {
        self.require(Stage::Playing, "complete the game")?;
        if !self.engine.is_complete() {
            return Err(RpsError::InvalidAction(format!(
                "game is not finished: round {} of {}",
                self.session.current_round(),
                self.session.total_rounds()
            )));
        }

        self.logger.minimal(&format!(
            "{} {}",
            self.session.verdict().title(),
            self.session.verdict_message()
        ));
        self.transition(Stage::Results);
        Ok(())
    }

    /// Rematch: keep the name, clear the scoreboard, pick rounds again
    pub fn play_again(&mut self) -> Result<()> {
        self.require(Stage::Results, "play again")?;
        self.engine.cancel();
        self.session.reset_for_rematch();
        self.transition(Stage::Setup);
        Ok(())
    }

    /// Full reset back to the landing screen
    pub fn new_game(&mut self) -> Result<()> {
        self.require(Stage::Results, "start a new game")?;
        self.engine.cancel();
        self.session.reset();
        self.transition(Stage::Landing);
        Ok(())
    }

    /// Cancel any pending timers (presentation layer going away)
    pub fn teardown(&mut self) {
        self.engine.cancel();
        self.logger.verbose("Pending timers cancelled");
    }
}
