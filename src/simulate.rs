//! Batch simulation: many games in parallel with summary statistics
//!
//! Each game pits a random player against the random computer opponent on
//! its own navigator. Games run on the rayon thread pool with per-game seeds
//! derived from one master seed, so a run is reproducible regardless of
//! scheduling.

use crate::core::{Move, Outcome, Verdict};
use crate::game::{
    GameEndReason, GameLogger, GameLoop, GameResult, Navigator, RandomController, RoundTiming,
    VerbosityLevel,
};
use crate::{Result, RpsError};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Duration;

/// Parameters of a simulation run
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub games: usize,
    pub rounds: u32,
    pub seed: u64,
}

/// Aggregated results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub games: usize,
    pub player_wins: usize,
    pub computer_wins: usize,
    pub drawn_games: usize,
    /// Per-round outcome counts across all games, from the player's side
    pub round_wins: u64,
    pub round_losses: u64,
    pub round_ties: u64,
    /// Move frequencies indexed like `Move::ALL`
    pub player_moves: [u64; 3],
    pub computer_moves: [u64; 3],
}

impl SimulationStats {
    fn record(&mut self, result: &GameResult) {
        self.games += 1;
        match result.verdict {
            Some(Verdict::PlayerWins) => self.player_wins += 1,
            Some(Verdict::ComputerWins) => self.computer_wins += 1,
            Some(Verdict::Tie) | None => self.drawn_games += 1,
        }

        for record in &result.history {
            match record.outcome() {
                Outcome::Win => self.round_wins += 1,
                Outcome::Lose => self.round_losses += 1,
                Outcome::Tie => self.round_ties += 1,
            }
            self.player_moves[record.player_move().index()] += 1;
            self.computer_moves[record.computer_move().index()] += 1;
        }
    }

    fn merge(mut self, other: SimulationStats) -> SimulationStats {
        self.games += other.games;
        self.player_wins += other.player_wins;
        self.computer_wins += other.computer_wins;
        self.drawn_games += other.drawn_games;
        self.round_wins += other.round_wins;
        self.round_losses += other.round_losses;
        self.round_ties += other.round_ties;
        for i in 0..3 {
            self.player_moves[i] += other.player_moves[i];
            self.computer_moves[i] += other.computer_moves[i];
        }
        self
    }

    pub fn total_rounds(&self) -> u64 {
        self.round_wins + self.round_losses + self.round_ties
    }

    /// Share of the computer's moves that were `mv`
    pub fn computer_move_share(&self, mv: Move) -> f64 {
        let total: u64 = self.computer_moves.iter().sum();
        if total == 0 {
            0.0
        } else {
            self.computer_moves[mv.index()] as f64 / total as f64
        }
    }

    /// Print the summary tables
    pub fn print_summary(&self, elapsed: Duration) {
        let pct = |n: u64, d: u64| {
            if d == 0 {
                0.0
            } else {
                100.0 * n as f64 / d as f64
            }
        };

        println!("\n=== Simulation Complete ===");
        println!("Total games played: {}", self.games);
        println!("Elapsed time: {:.2}s", elapsed.as_secs_f64());
        if elapsed.as_secs_f64() > 0.0 {
            println!("Games per second: {:.2}", self.games as f64 / elapsed.as_secs_f64());
        }

        println!("\n=== Game Results ===");
        let games = self.games as u64;
        println!(
            "Player wins: {} ({:.1}%)",
            self.player_wins,
            pct(self.player_wins as u64, games)
        );
        println!(
            "Computer wins: {} ({:.1}%)",
            self.computer_wins,
            pct(self.computer_wins as u64, games)
        );
        println!(
            "Drawn games: {} ({:.1}%)",
            self.drawn_games,
            pct(self.drawn_games as u64, games)
        );

        let rounds = self.total_rounds();
        println!("\n=== Round Outcomes ({rounds} rounds) ===");
        println!("  Win: {} ({:.1}%)", self.round_wins, pct(self.round_wins, rounds));
        println!("  Lose: {} ({:.1}%)", self.round_losses, pct(self.round_losses, rounds));
        println!("  Tie: {} ({:.1}%)", self.round_ties, pct(self.round_ties, rounds));

        println!("\n=== Computer Move Frequencies ===");
        for mv in Move::ALL {
            println!(
                "  {}: {} ({:.1}%)",
                mv,
                self.computer_moves[mv.index()],
                100.0 * self.computer_move_share(mv)
            );
        }
    }
}

/// Seed for game `game_idx`, spread so neighbouring games are unrelated
fn game_seed(master: u64, game_idx: usize) -> u64 {
    master.wrapping_add((game_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play one silent game to completion
fn play_one(config: &SimulationConfig, game_idx: usize) -> Result<GameResult> {
    let seed = game_seed(config.seed, game_idx);
    let player_seed = seed.wrapping_add(0x1234_5678_9ABC_DEF0);
    let computer_seed = seed.wrapping_add(0xFEDC_BA98_7654_3210);

    let mut navigator = Navigator::new(Box::new(RandomController::with_seed(computer_seed)))
        .with_timing(RoundTiming::instant())
        .with_logger(GameLogger::with_verbosity(VerbosityLevel::Silent));
    navigator.start()?;
    navigator.submit_name(&format!("Sim {game_idx}"))?;
    navigator.submit_round_count(config.rounds)?;

    let mut player = RandomController::with_seed(player_seed);
    let result = GameLoop::new(&mut navigator).run_game(&mut player)?;

    if result.end_reason != GameEndReason::Completed {
        return Err(RpsError::InvalidAction(format!(
            "simulated game {game_idx} ended early"
        )));
    }
    Ok(result)
}

/// Run `config.games` games in parallel and aggregate the results
pub fn run_simulation(config: SimulationConfig) -> Result<SimulationStats> {
    if config.games == 0 {
        return Err(RpsError::InvalidAction(
            "simulation needs at least one game".to_string(),
        ));
    }
    if config.rounds == 0 {
        return Err(RpsError::InvalidRoundCount(config.rounds));
    }

    (0..config.games)
        .into_par_iter()
        .map(|game_idx| play_one(&config, game_idx))
        .try_fold(SimulationStats::default, |mut stats, result| {
            stats.record(&result?);
            Ok::<_, RpsError>(stats)
        })
        .try_reduce(SimulationStats::default, |a, b| Ok(a.merge(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_add_up() {
        let config = SimulationConfig {
            games: 200,
            rounds: 5,
            seed: 42,
        };
        let stats = run_simulation(config).unwrap();

        assert_eq!(stats.games, 200);
        assert_eq!(stats.player_wins + stats.computer_wins + stats.drawn_games, 200);
        assert_eq!(stats.total_rounds(), 1000);
        assert_eq!(stats.player_moves.iter().sum::<u64>(), 1000);
        assert_eq!(stats.computer_moves.iter().sum::<u64>(), 1000);
    }

    #[test]
    fn test_same_seed_same_stats() {
        let config = SimulationConfig {
            games: 100,
            rounds: 3,
            seed: 7,
        };
        assert_eq!(run_simulation(config).unwrap(), run_simulation(config).unwrap());
    }

    #[test]
    fn test_computer_moves_near_uniform() {
        let config = SimulationConfig {
            games: 2000,
            rounds: 10,
            seed: 1234,
        };
        let stats = run_simulation(config).unwrap();

        for mv in Move::ALL {
            let share = stats.computer_move_share(mv);
            assert!((share - 1.0 / 3.0).abs() < 0.02, "{mv}: {share}");
        }
    }

    #[test]
    fn test_rejects_empty_runs() {
        let zero_games = SimulationConfig { games: 0, rounds: 3, seed: 0 };
        assert!(run_simulation(zero_games).is_err());

        let zero_rounds = SimulationConfig { games: 5, rounds: 0, seed: 0 };
        assert!(matches!(
            run_simulation(zero_rounds),
            Err(RpsError::InvalidRoundCount(0))
        ));
    }

    #[test]
    fn test_merge() {
        let mut a = SimulationStats::default();
        a.games = 2;
        a.player_wins = 1;
        a.computer_moves = [1, 2, 3];
        let mut b = SimulationStats::default();
        b.games = 3;
        b.drawn_games = 3;
        b.computer_moves = [4, 5, 6];

        let merged = a.merge(b);
        assert_eq!(merged.games, 5);
        assert_eq!(merged.player_wins, 1);
        assert_eq!(merged.drawn_games, 3);
        assert_eq!(merged.computer_moves, [5, 7, 9]);
    }

    #[test]
    fn test_round_counts_past_u32() {
        let big = u64::from(u32::MAX);
        let mut a = SimulationStats::default();
        a.round_wins = big;
        a.round_ties = big;
        let mut b = SimulationStats::default();
        b.round_wins = big;
        b.round_losses = 1;

        let merged = a.merge(b);
        assert_eq!(merged.round_wins, 2 * big);
        assert_eq!(merged.total_rounds(), 3 * big + 1);
    }
}
