//! End-to-end determinism tests
//!
//! Runs the actual `rps` binary twice with the same seed and compares stdout.
//!
//! One test is generated for each `.moves` file in `test_scripts/` using the
//! `dir-test` procedural macro. Each file holds the player's moves; the game
//! has one round per move.

use dir_test::{dir_test, Fixture};
use rps_arena::core::Move;
use similar_asserts::assert_eq;
use std::process::Command;

/// Run `rps play` with a fixed player and capture stdout
fn run_scripted_game(moves: &str, seed: u64, extra: &[&str]) -> String {
    let rounds = count_moves(moves);
    let output = Command::new(env!("CARGO_BIN_EXE_rps"))
        .args([
            "play",
            "--name",
            "Tester",
            "--player=fixed",
            "--fixed-moves",
            moves.trim(),
            "--rounds",
            &rounds.to_string(),
            "--seed",
            &seed.to_string(),
            "--instant",
        ])
        .args(extra)
        .output()
        .expect("Failed to run rps binary");

    assert!(
        output.status.success(),
        "rps exited with {:?}: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in stdout")
}

fn count_moves(moves: &str) -> usize {
    moves
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .inspect(|tok| {
            tok.parse::<Move>()
                .unwrap_or_else(|e| panic!("bad move {tok:?} in fixture: {e}"));
        })
        .count()
}

/// Same seed, same script: identical transcripts
#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_scripts",
    glob: "**/*.moves",
)]
fn test_script_determinism(fixture: Fixture<&str>) {
    let moves = fixture.content();
    let run1 = run_scripted_game(moves, 42, &["--verbosity=verbose"]);
    let run2 = run_scripted_game(moves, 42, &["--verbosity=verbose"]);

    assert!(!run1.is_empty(), "{} produced empty output", fixture.path());
    assert!(run1.contains("Final score: Tester"));
    assert_eq!(run1, run2);

    let rounds = count_moves(moves);
    let last_round = format!("Round {rounds} of {rounds}:");
    assert!(run1.contains(&last_round), "missing {last_round:?} in:\n{run1}");
}

#[test]
fn test_different_seeds_diverge() {
    // Ten rounds against two different computer sequences
    let moves = "rock rock rock rock rock rock rock rock rock rock";
    let a = run_scripted_game(moves, 1, &[]);
    let b = run_scripted_game(moves, 2, &[]);
    assert_ne!(a, b);
}

#[test]
fn test_json_output_is_line_delimited() {
    let stdout = run_scripted_game("rock paper scissors", 7, &["--format=json"]);

    let entries: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("{e}: {line}")))
        .collect();
    assert!(!entries.is_empty());

    let results = entries
        .iter()
        .filter(|e| e["category"] == "results")
        .collect::<Vec<_>>();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["data"]["player_name"], "Tester");
    assert_eq!(results[0]["data"]["history"].as_array().map(Vec::len), Some(3));

    let complete = entries
        .iter()
        .filter(|e| e["data"]["event"] == "game_complete")
        .count();
    assert_eq!(complete, 1);
}

#[test]
fn test_json_results_at_minimal_verbosity() {
    let stdout = run_scripted_game("rock paper", 7, &["--format=json", "--verbosity=minimal"]);

    let entries: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("{e}: {line}")))
        .collect();

    // Per-round events are Normal level; only the summary gets through
    assert!(entries.iter().all(|e| e["category"] != "round"));
    let results: Vec<_> = entries.iter().filter(|e| e["category"] == "results").collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["level"], "minimal");
    assert_eq!(results[0]["data"]["history"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_fixed_player_requires_moves() {
    let output = Command::new(env!("CARGO_BIN_EXE_rps"))
        .args(["play", "--name", "Tester", "--player=fixed", "--instant"])
        .output()
        .expect("Failed to run rps binary");
    assert!(!output.status.success());
}
