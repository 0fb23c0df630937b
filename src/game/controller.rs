//! Move controller trait and session view
//!
//! This module defines the interface between the round engine and whatever
//! picks moves: the computer opponent, a scripted test double, or a human at
//! the terminal. Controllers inspect a read-only view of the session and
//! return a move.

use crate::core::{Move, RoundRecord, Session, Verdict};
use crate::game::GameLogger;

/// Read-only view of the session for controllers and renderers
///
/// This provides access to game information without allowing mutation.
pub struct SessionView<'a> {
    session: &'a Session,
    logger: Option<&'a GameLogger>,
}

impl<'a> SessionView<'a> {
    pub fn new(session: &'a Session) -> Self {
        SessionView {
            session,
            logger: None,
        }
    }

    pub fn with_logger(session: &'a Session, logger: &'a GameLogger) -> Self {
        SessionView {
            session,
            logger: Some(logger),
        }
    }

    /// Underlying session snapshot
    pub fn session(&self) -> &'a Session {
        self.session
    }

    pub fn logger(&self) -> Option<&'a GameLogger> {
        self.logger
    }

    pub fn player_name(&self) -> &'a str {
        self.session.player_name().as_str()
    }

    pub fn current_round(&self) -> u32 {
        self.session.current_round()
    }

    pub fn total_rounds(&self) -> u32 {
        self.session.total_rounds()
    }

    /// (player, computer)
    pub fn score(&self) -> (u32, u32) {
        (self.session.player_score(), self.session.computer_score())
    }

    pub fn last_moves(&self) -> (Option<Move>, Option<Move>) {
        (self.session.player_move(), self.session.computer_move())
    }

    pub fn history(&self) -> &'a [RoundRecord] {
        self.session.history()
    }

    /// Round number the next accepted move will get
    pub fn next_round(&self) -> u32 {
        self.session.current_round() + 1
    }
}

/// Move controller trait
///
/// Implement this trait to create opponents or connect a UI.
pub trait MoveController {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Pick a move for the upcoming round
    ///
    /// Returning None means the controller has no move to offer (script
    /// exhausted, player quit).
    fn choose_move(&mut self, view: &SessionView) -> Option<Move>;

    /// Called after each round resolves
    fn on_round_resolved(&mut self, _view: &SessionView, _record: &RoundRecord) {}

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &SessionView, _verdict: Verdict) {}
}

impl<C: MoveController + ?Sized> MoveController for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&mut self, view: &SessionView) -> Option<Move> {
        (**self).choose_move(view)
    }

    fn on_round_resolved(&mut self, view: &SessionView, record: &RoundRecord) {
        (**self).on_round_resolved(view, record)
    }

    fn on_game_end(&mut self, view: &SessionView, verdict: Verdict) {
        (**self).on_game_end(view, verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerName;

    #[test]
    fn test_view_reads_session() {
        let mut session = Session::new();
        session.set_player_name(PlayerName::new("Grace"));
        session.set_total_rounds(5);
        let round = session.begin_round(Move::Paper);
        session.record_round(RoundRecord::new(round, Move::Paper, Move::Scissors));

        let view = SessionView::new(&session);
        assert_eq!(view.player_name(), "Grace");
        assert_eq!(view.current_round(), 1);
        assert_eq!(view.next_round(), 2);
        assert_eq!(view.total_rounds(), 5);
        assert_eq!(view.score(), (0, 1));
        assert_eq!(view.last_moves(), (Some(Move::Paper), Some(Move::Scissors)));
        assert_eq!(view.history().len(), 1);
        assert!(view.logger().is_none());
    }
}
