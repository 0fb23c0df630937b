//! Round engine
//!
//! Resolves one round per accepted player move:
//!
//! ```text
//! Idle --submit_move--> AwaitingOpponentMove --reveal timer--> Resolved
//!   ^                                                             |
//!   +-------------------- settle timer (rounds left) -------------+
//!                         settle timer (last round) --> GameComplete
//! ```
//!
//! The two presentation delays are not slept on here. Each transition that
//! needs a delay hands back a [`PendingTimer`]; whoever drives the engine
//! waits `timer.delay` and passes the token to [`RoundEngine::fire_timer`].
//! Cancelling bumps the engine epoch, so tokens issued before the cancel are
//! ignored instead of touching a replaced session.

use crate::core::{Move, RoundRecord, Session};
use crate::game::controller::{MoveController, SessionView};
use crate::game::GameLogger;
use crate::{Result, RpsError};
use serde::Serialize;
use std::time::Duration;

/// Per-round engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    AwaitingOpponentMove,
    Resolved,
    GameComplete,
}

/// What a pending timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Reveal the opponent's move and resolve the round
    RevealOpponent,
    /// End the result display and return to Idle (or finish the game)
    Settle,
}

/// A scheduled presentation delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingTimer {
    pub kind: TimerKind,
    pub delay: Duration,
    epoch: u64,
}

/// Presentation delays between round steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTiming {
    /// Move accepted until opponent move revealed
    pub reveal_delay: Duration,
    /// Outcome shown until the next round (or game end)
    pub result_delay: Duration,
    /// Final round settled until the results screen
    pub completion_delay: Duration,
}

impl RoundTiming {
    /// No delays at all (tests, simulation)
    pub fn instant() -> Self {
        RoundTiming {
            reveal_delay: Duration::ZERO,
            result_delay: Duration::ZERO,
            completion_delay: Duration::ZERO,
        }
    }
}

impl Default for RoundTiming {
    fn default() -> Self {
        RoundTiming {
            reveal_delay: Duration::from_millis(600),
            result_delay: Duration::from_millis(2000),
            completion_delay: Duration::from_millis(1000),
        }
    }
}

/// Signals emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    /// A move was accepted; the reveal timer is pending
    MoveAccepted {
        round: u32,
        player_move: Move,
        timer: PendingTimer,
    },
    /// The round has an outcome; the settle timer is pending
    Resolved {
        record: RoundRecord,
        timer: PendingTimer,
    },
    /// Back to Idle, waiting for the next move
    Ready { next_round: u32 },
    /// All rounds are resolved. Emitted once per game.
    GameComplete {
        player_score: u32,
        computer_score: u32,
    },
}

/// Round engine, active while the navigator is in the Playing stage
pub struct RoundEngine {
    state: EngineState,
    /// Source of the computer's moves
    opponent: Box<dyn MoveController>,
    timing: RoundTiming,
    /// Incremented on every cancel; timers carry the epoch they were issued in
    epoch: u64,
}

impl RoundEngine {
    pub fn new(opponent: Box<dyn MoveController>) -> Self {
        RoundEngine {
            state: EngineState::Idle,
            opponent,
            timing: RoundTiming::default(),
            epoch: 0,
        }
    }

    pub fn with_timing(mut self, timing: RoundTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn timing(&self) -> RoundTiming {
        self.timing
    }

    pub fn set_timing(&mut self, timing: RoundTiming) {
        self.timing = timing;
    }

    pub fn is_complete(&self) -> bool {
        self.state == EngineState::GameComplete
    }

    fn schedule(&self, kind: TimerKind) -> PendingTimer {
        let delay = match kind {
            TimerKind::RevealOpponent => self.timing.reveal_delay,
            TimerKind::Settle => self.timing.result_delay,
        };
        PendingTimer {
            kind,
            delay,
            epoch: self.epoch,
        }
    }

    /// Is this token still live?
    pub fn is_current(&self, timer: &PendingTimer) -> bool {
        timer.epoch == self.epoch
    }

    /// Offer a player move
    ///
    /// Returns None, leaving the session untouched, when the engine is not
    /// Idle or all rounds have been played. This is what keeps rapid repeated
    /// input from counting a round twice.
    pub fn submit_move(
        &mut self,
        session: &mut Session,
        player_move: Move,
        logger: &GameLogger,
    ) -> Option<RoundEvent> {
        if self.state != EngineState::Idle || session.is_finished() {
            logger.verbose(&format!(
                "Ignoring {player_move}: engine is {:?}, round {}/{}",
                self.state,
                session.current_round(),
                session.total_rounds()
            ));
            return None;
        }

        let round = session.begin_round(player_move);
        self.state = EngineState::AwaitingOpponentMove;
        logger.verbose(&format!("Round {round}: player chose {player_move}"));

        Some(RoundEvent::MoveAccepted {
            round,
            player_move,
            timer: self.schedule(TimerKind::RevealOpponent),
        })
    }

    /// Fire a pending timer
    ///
    /// Stale tokens (issued before a cancel) and tokens that do not match the
    /// current state return `Ok(None)`. The only error is an opponent that
    /// produced no move, in which case the round stays pending.
    pub fn fire_timer(
        &mut self,
        session: &mut Session,
        timer: PendingTimer,
        logger: &GameLogger,
    ) -> Result<Option<RoundEvent>> {
        if !self.is_current(&timer) {
            logger.verbose(&format!("Dropping stale {:?} timer", timer.kind));
            return Ok(None);
        }

        match (self.state, timer.kind) {
            (EngineState::AwaitingOpponentMove, TimerKind::RevealOpponent) => {
                self.reveal(session, logger).map(Some)
            }
            (EngineState::Resolved, TimerKind::Settle) => Ok(Some(self.settle(session, logger))),
            (state, kind) => {
                logger.verbose(&format!("Ignoring {kind:?} timer in state {state:?}"));
                Ok(None)
            }
        }
    }

    fn reveal(&mut self, session: &mut Session, logger: &GameLogger) -> Result<RoundEvent> {
        let player_move = session.player_move().ok_or_else(|| {
            RpsError::InvalidAction("no pending player move to resolve".to_string())
        })?;

        let view = SessionView::with_logger(session, logger);
        let computer_move = self.opponent.choose_move(&view).ok_or_else(|| {
            RpsError::InvalidAction(format!(
                "opponent '{}' produced no move for round {}",
                self.opponent.name(),
                session.current_round()
            ))
        })?;

        let record = RoundRecord::new(session.current_round(), player_move, computer_move);
        session.record_round(record);
        self.state = EngineState::Resolved;
        debug_assert!(session.check_invariants().is_ok());

        logger.normal(&format!(
            "Round {} of {}: {} vs {} - {} ({}-{})",
            record.round(),
            session.total_rounds(),
            record.player_move(),
            record.computer_move(),
            record.outcome(),
            session.player_score(),
            session.computer_score()
        ));

        self.opponent
            .on_round_resolved(&SessionView::with_logger(session, logger), &record);

        Ok(RoundEvent::Resolved {
            record,
            timer: self.schedule(TimerKind::Settle),
        })
    }

    fn settle(&mut self, session: &Session, logger: &GameLogger) -> RoundEvent {
        if session.is_finished() {
            self.state = EngineState::GameComplete;
            logger.verbose("All rounds played");

            let view = SessionView::with_logger(session, logger);
            self.opponent.on_game_end(&view, session.verdict());

            RoundEvent::GameComplete {
                player_score: session.player_score(),
                computer_score: session.computer_score(),
            }
        } else {
            self.state = EngineState::Idle;
            RoundEvent::Ready {
                next_round: session.current_round() + 1,
            }
        }
    }

    /// Cancel pending timers and return to Idle
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.state = EngineState::Idle;
    }
}
