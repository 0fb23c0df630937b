//! Performance benchmarks for the round engine
//!
//! Measures full games through the navigator with zero delays, plus the
//! parallel simulation used by `rps simulate`.
//!
//! Both sides are seeded RandomControllers, so every iteration of a given
//! seed plays the same moves.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rps_arena::{
    core::Move,
    game::{GameLogger, GameLoop, GameResult, Navigator, RandomController, RoundTiming, VerbosityLevel},
    simulate::{run_simulation, SimulationConfig},
    Result,
};
use std::time::{Duration, Instant};

/// Play one silent game of `rounds` rounds
fn run_game(seed: u64, rounds: u32) -> Result<GameResult> {
    let mut navigator = Navigator::new(Box::new(RandomController::with_seed(seed)))
        .with_timing(RoundTiming::instant())
        .with_logger(GameLogger::with_verbosity(VerbosityLevel::Silent));
    navigator.start()?;
    navigator.submit_name("Bench")?;
    navigator.submit_round_count(rounds)?;

    let mut player = RandomController::with_seed(seed + 1);
    GameLoop::new(&mut navigator).run_game(&mut player)
}

/// Benchmark: one game per iteration at each round count
fn bench_game_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");
    let seed = 42u64;

    {
        // Run a warmup game to print metrics
        let start = Instant::now();
        if let Ok(result) = run_game(seed, 10) {
            let duration = start.elapsed();
            println!("\nWarmup game (seed {seed}):");
            println!("  Rounds: {}", result.rounds_played);
            println!("  Score: {}-{}", result.player_score, result.computer_score);
            println!("  Duration: {duration:?}");
            println!(
                "  Rounds/sec: {:.2}",
                result.rounds_played as f64 / duration.as_secs_f64()
            );
        }
    }

    for rounds in [3u32, 10, 100] {
        group.bench_with_input(BenchmarkId::new("fresh", rounds), &rounds, |b, &rounds| {
            b.iter(|| run_game(black_box(seed), rounds).expect("Game should complete successfully"));
        });
    }

    group.finish();
}

/// Benchmark: outcome resolution over all nine pairs
fn bench_outcome_table(c: &mut Criterion) {
    c.bench_function("outcome_all_pairs", |b| {
        b.iter(|| {
            let mut wins = 0u32;
            for p in Move::ALL {
                for o in Move::ALL {
                    if black_box(p).beats(black_box(o)) {
                        wins += 1;
                    }
                }
            }
            wins
        });
    });
}

/// Benchmark: parallel batch simulation
fn bench_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    let config = SimulationConfig {
        games: 10_000,
        rounds: 5,
        seed: 42,
    };
    group.bench_function(BenchmarkId::new("parallel", config.games), |b| {
        b.iter(|| run_simulation(black_box(config)).expect("Simulation should complete"));
    });

    group.finish();
}

criterion_group!(benches, bench_game_fresh, bench_outcome_table, bench_simulation);
criterion_main!(benches);
