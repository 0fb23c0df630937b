//! Random controller: the computer opponent
//!
//! Picks each move uniformly from rock, paper and scissors, independently of
//! every earlier round.

use crate::core::Move;
use crate::game::controller::{MoveController, SessionView};
use rand::Rng;

/// A controller that makes random choices
pub struct RandomController {
    rng: Box<dyn rand::RngCore>,
}

impl RandomController {
    /// Create a new random controller with default RNG
    pub fn new() -> Self {
        RandomController {
            rng: Box::new(rand::thread_rng()),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        RandomController {
            rng: Box::new(rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(seed)),
        }
    }

    /// Draw one move
    pub fn next_move(&mut self) -> Move {
        let index = self.rng.gen_range(0..Move::ALL.len());
        Move::ALL[index]
    }
}

impl Default for RandomController {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveController for RandomController {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, view: &SessionView) -> Option<Move> {
        let choice = self.next_move();
        if let Some(logger) = view.logger() {
            logger.controller_choice("RANDOM", &format!("chose {choice}"));
        }
        Some(choice)
    }
}
