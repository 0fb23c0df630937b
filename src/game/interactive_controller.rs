//! Interactive text controller for a human player
//!
//! Reads choices from a line-based input (stdin by default) and renders the
//! screens of the game as plain text. This is the presentation layer of the
//! `rps` binary.

use crate::core::{Move, RoundRecord, Verdict, ROUND_OPTIONS};
use crate::game::controller::{MoveController, SessionView};
use crate::Result;
use std::io::{self, BufRead, StdinLock, Write};

/// What the player picked on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsChoice {
    PlayAgain,
    NewGame,
    Quit,
}

/// A controller that prompts a human player via a line reader
///
/// Screen prompts return read failures directly. A failure while asking for
/// a move can only end the move stream, so it is kept until the caller
/// collects it with [`take_input_error`](Self::take_input_error).
pub struct InteractiveController<R: BufRead = StdinLock<'static>> {
    input: R,
    input_error: Option<io::Error>,
}

impl InteractiveController {
    /// Create a controller reading from stdin
    pub fn new() -> Self {
        InteractiveController {
            input: io::stdin().lock(),
            input_error: None,
        }
    }
}

impl Default for InteractiveController {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> InteractiveController<R> {
    /// Create a controller reading from any line source
    pub fn with_input(input: R) -> Self {
        InteractiveController {
            input,
            input_error: None,
        }
    }

    /// Print a prompt and read one trimmed line (None on end of input)
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{} ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read error hit while asking for a move, if any
    pub fn take_input_error(&mut self) -> Result<()> {
        match self.input_error.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Landing screen; returns false if the player quits
    pub fn show_landing(&mut self) -> Result<bool> {
        println!("\n=== Rock Paper Scissors ===");
        println!("Rock crushes scissors, scissors cut paper, paper covers rock.");
        Ok(match self.read_line("Press Enter to start (q to quit):")? {
            Some(line) => !is_quit(&line),
            None => false,
        })
    }

    /// Name entry screen: raw input, validated by the navigator
    pub fn prompt_name(&mut self) -> Result<Option<String>> {
        println!("\n=== Enter Your Name ===");
        Ok(self.read_line("What should we call you?")?)
    }

    /// Setup screen: one of the offered round counts
    pub fn prompt_rounds(&mut self, player_name: &str) -> Result<Option<u32>> {
        println!("\n=== Game Setup ===");
        println!("Get ready, {player_name}!");
        let options: Vec<String> = ROUND_OPTIONS.iter().map(u32::to_string).collect();

        loop {
            let Some(line) = self.read_line(&format!(
                "How many rounds do you want to play? [{}] (Enter for {}):",
                options.join("/"),
                ROUND_OPTIONS[0]
            ))?
            else {
                return Ok(None);
            };
            if line.is_empty() {
                return Ok(Some(ROUND_OPTIONS[0]));
            }
            if is_quit(&line) {
                return Ok(None);
            }
            match line.parse::<u32>() {
                Ok(rounds) if ROUND_OPTIONS.contains(&rounds) => return Ok(Some(rounds)),
                _ => eprintln!("Choose one of {}.", options.join(", ")),
            }
        }
    }

    /// Results screen with the round history table
    pub fn prompt_results(&mut self, view: &SessionView) -> Result<ResultsChoice> {
        let session = view.session();
        let verdict = session.verdict();

        println!("\n=== {} ===", verdict.title());
        println!("{}", session.verdict_message());
        if verdict != Verdict::Tie {
            println!("Winner: {}", session.winner_name());
        }
        display_history(view.history());

        loop {
            let Some(line) = self.read_line("[a] Play again  [n] New game  [q] Quit:")? else {
                return Ok(ResultsChoice::Quit);
            };
            match line.to_lowercase().as_str() {
                "a" | "again" => return Ok(ResultsChoice::PlayAgain),
                "n" | "new" => return Ok(ResultsChoice::NewGame),
                "q" | "quit" => return Ok(ResultsChoice::Quit),
                _ => eprintln!("Enter a, n or q."),
            }
        }
    }

    fn display_help(&self) {
        println!("\n=== Help ===");
        println!("  0, r, rock      - Play rock");
        println!("  1, p, paper     - Play paper");
        println!("  2, s, scissors  - Play scissors");
        println!("  h               - Show round history");
        println!("  ?               - Show this help menu");
        println!("  q               - Quit the game");
        println!();
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "q" | "quit")
}

/// Print the round history table
pub fn display_history(history: &[RoundRecord]) {
    println!("\nRound  You       Computer  Result");
    if history.is_empty() {
        println!("  (no rounds played)");
    }
    for record in history {
        println!(
            "{:<6} {:<9} {:<9} {}",
            record.round(),
            record.player_move().to_string(),
            record.computer_move().to_string(),
            record.outcome()
        );
    }
}

impl<R: BufRead> MoveController for InteractiveController<R> {
    fn name(&self) -> &str {
        "tui"
    }

    fn choose_move(&mut self, view: &SessionView) -> Option<Move> {
        let (you, computer) = view.score();
        println!(
            "\n  ==> Round {} of {} | {} {} - {} Computer",
            view.next_round(),
            view.total_rounds(),
            view.player_name(),
            you,
            computer
        );
        for (idx, mv) in Move::ALL.iter().enumerate() {
            println!("  [{idx}] {mv}");
        }

        loop {
            let line = match self.read_line("Make your choice! (0-2, ? for help):") {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    self.input_error = Some(e);
                    return None;
                }
            };
            match line.as_str() {
                "?" => {
                    self.display_help();
                    continue;
                }
                "h" => {
                    display_history(view.history());
                    continue;
                }
                _ if is_quit(&line) => return None,
                _ => {}
            }

            if let Ok(idx) = line.parse::<usize>() {
                match Move::ALL.get(idx) {
                    Some(&mv) => return Some(mv),
                    None => {
                        eprintln!("Invalid choice. Enter 0-2.");
                        continue;
                    }
                }
            }

            match line.parse::<Move>() {
                Ok(mv) => return Some(mv),
                Err(e) => eprintln!("{e}"),
            }
        }
    }
}
