//! Scripted controller for testing and replays
//!
//! This controller follows a predetermined sequence of moves, useful for
//! deterministic tests and non-interactive runs of the binary.

use crate::core::Move;
use crate::game::controller::{MoveController, SessionView};
use crate::Result;

/// A controller that follows a predetermined sequence of moves
#[derive(Debug, Clone)]
pub struct ScriptedController {
    moves: Vec<Move>,
    current_step: usize,
}

impl ScriptedController {
    pub fn new(moves: Vec<Move>) -> Self {
        ScriptedController {
            moves,
            current_step: 0,
        }
    }

    /// Build a script from text such as "rock paper s" or "r,p,s"
    pub fn parse(input: &str) -> Result<Self> {
        let moves = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<Move>)
            .collect::<Result<Vec<_>>>()?;
        Ok(ScriptedController::new(moves))
    }

    /// Moves not yet played
    pub fn remaining(&self) -> usize {
        self.moves.len() - self.current_step
    }
}

impl MoveController for ScriptedController {
    fn name(&self) -> &str {
        "scripted"
    }

    fn choose_move(&mut self, view: &SessionView) -> Option<Move> {
        let choice = self.moves.get(self.current_step).copied()?;
        self.current_step += 1;
        if let Some(logger) = view.logger() {
            logger.controller_choice("SCRIPT", &format!("chose {choice}"));
        }
        Some(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Session;

    #[test]
    fn test_scripted_controller() {
        let session = Session::new();
        let view = SessionView::new(&session);
        let mut controller =
            ScriptedController::new(vec![Move::Rock, Move::Paper, Move::Scissors]);

        assert_eq!(controller.choose_move(&view), Some(Move::Rock));
        assert_eq!(controller.choose_move(&view), Some(Move::Paper));
        assert_eq!(controller.remaining(), 1);
        assert_eq!(controller.choose_move(&view), Some(Move::Scissors));

        // No more scripted moves
        assert_eq!(controller.choose_move(&view), None);
    }

    #[test]
    fn test_parse_script() {
        let controller = ScriptedController::parse("rock, p  S\nscissors").unwrap();
        assert_eq!(
            controller.moves,
            vec![Move::Rock, Move::Paper, Move::Scissors, Move::Scissors]
        );
        assert!(ScriptedController::parse("rock spock").is_err());
        assert_eq!(ScriptedController::parse("").unwrap().remaining(), 0);
    }
}
