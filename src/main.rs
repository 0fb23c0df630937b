//! Rock Paper Scissors - Main Binary
//!
//! Text-based best-of-N games against a random computer opponent

use clap::{Parser, Subcommand, ValueEnum};
use rps_arena::{
    core::DEFAULT_TOTAL_ROUNDS,
    game::{
        interactive_controller::display_history, GameEndReason, GameLogger, GameLoop, GameResult,
        InteractiveController, MoveController, Navigator, OutputFormat, RandomController,
        ResultsChoice, RoundTiming, ScriptedController, VerbosityLevel,
    },
    simulate::{run_simulation, SimulationConfig},
    Result, RpsError,
};
use std::time::Instant;

/// Who makes the player's moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ControllerType {
    /// Text UI controller for human play via stdin
    Tui,
    /// Makes random choices
    Random,
    /// Fixed script of moves (requires --fixed-moves)
    Fixed,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "rps")]
#[command(about = "Rock Paper Scissors against the computer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game (interactive unless a scripted player is chosen)
    Play {
        /// Player name (skips the name prompt)
        #[arg(long)]
        name: Option<String>,

        /// Number of rounds (skips the setup prompt)
        #[arg(long)]
        rounds: Option<u32>,

        /// Player controller type
        #[arg(long, value_enum, default_value = "tui")]
        player: ControllerType,

        /// Moves for the fixed player (space or comma separated, e.g. "rock paper s")
        #[arg(long, value_name = "MOVES")]
        fixed_moves: Option<String>,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Log output format
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Skip the reveal and result pauses
        #[arg(long)]
        instant: bool,
    },

    /// Run many random-vs-random games in parallel and print statistics
    Simulate {
        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 1000)]
        games: usize,

        /// Rounds per game
        #[arg(long, short = 'r', default_value_t = DEFAULT_TOTAL_ROUNDS)]
        rounds: u32,

        /// Random seed for reproducible runs
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

/// Options of the `play` subcommand
struct PlayOptions {
    name: Option<String>,
    rounds: Option<u32>,
    player: ControllerType,
    fixed_moves: Option<String>,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    format: OutputFormat,
    instant: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            name,
            rounds,
            player,
            fixed_moves,
            seed,
            verbosity,
            format,
            instant,
        } => {
            run_play(PlayOptions {
                name,
                rounds,
                player,
                fixed_moves,
                seed,
                verbosity: verbosity.into(),
                format: format.into(),
                instant,
            })
            .await?
        }
        Commands::Simulate {
            games,
            rounds,
            seed,
        } => run_simulate(games, rounds, seed)?,
    }

    Ok(())
}

/// Set up the navigator and hand off to the interactive or scripted flow
async fn run_play(opts: PlayOptions) -> Result<()> {
    let mut logger = GameLogger::with_verbosity(opts.verbosity);
    logger.set_output_format(opts.format);

    let opponent = match opts.seed {
        Some(seed) => RandomController::with_seed(seed),
        None => RandomController::new(),
    };
    let timing = if opts.instant {
        RoundTiming::instant()
    } else {
        RoundTiming::default()
    };

    let mut navigator = Navigator::new(Box::new(opponent))
        .with_timing(timing)
        .with_logger(logger);

    match opts.player {
        ControllerType::Tui => run_interactive(&mut navigator, &opts).await,
        ControllerType::Random => {
            // Use seed + 1 so the player and the computer draw different sequences
            let mut player = match opts.seed {
                Some(seed) => RandomController::with_seed(seed.wrapping_add(1)),
                None => RandomController::new(),
            };
            run_unattended(&mut navigator, &mut player, &opts).await
        }
        ControllerType::Fixed => {
            let mut player = match &opts.fixed_moves {
                Some(input) => ScriptedController::parse(input).map_err(|e| {
                    RpsError::InvalidAction(format!("Error parsing --fixed-moves: {e}"))
                })?,
                None => {
                    return Err(RpsError::InvalidAction(
                        "--fixed-moves is required when --player=fixed".to_string(),
                    ));
                }
            };
            run_unattended(&mut navigator, &mut player, &opts).await
        }
    }
}

/// Play the rounds, paced unless timing is instant
async fn play_rounds(
    navigator: &mut Navigator,
    player: &mut dyn MoveController,
    instant: bool,
) -> Result<GameResult> {
    let mut game_loop = GameLoop::new(navigator);
    if instant {
        game_loop.run_game(player)
    } else {
        game_loop.run_game_paced(player).await
    }
}

/// Full screen flow: landing, name, setup, playing and results
async fn run_interactive(navigator: &mut Navigator, opts: &PlayOptions) -> Result<()> {
    let mut screens = InteractiveController::new();
    let mut preset_name = opts.name.clone();
    let mut preset_rounds = opts.rounds;

    'landing: loop {
        if !screens.show_landing()? {
            return Ok(());
        }
        navigator.start()?;

        loop {
            let raw = match preset_name.take() {
                Some(name) => name,
                None => match screens.prompt_name()? {
                    Some(name) => name,
                    None => return Ok(()),
                },
            };
            match navigator.submit_name(&raw) {
                Ok(()) => break,
                Err(e) if e.is_validation() => eprintln!("{e}"),
                Err(e) => return Err(e),
            }
        }

        loop {
            let rounds = match preset_rounds.take() {
                Some(rounds) => rounds,
                None => {
                    let name = navigator.session().player_name().to_string();
                    match screens.prompt_rounds(&name)? {
                        Some(rounds) => rounds,
                        None => return Ok(()),
                    }
                }
            };
            match navigator.submit_round_count(rounds) {
                Ok(()) => {}
                Err(e) if e.is_validation() => {
                    eprintln!("{e}");
                    continue;
                }
                Err(e) => return Err(e),
            }

            let result = play_rounds(navigator, &mut screens, opts.instant).await?;
            if result.end_reason == GameEndReason::Abandoned {
                // A broken stdin looks like a quit until asked
                return screens.take_input_error();
            }

            match screens.prompt_results(&navigator.view())? {
                ResultsChoice::PlayAgain => navigator.play_again()?,
                ResultsChoice::NewGame => {
                    navigator.new_game()?;
                    continue 'landing;
                }
                ResultsChoice::Quit => return Ok(()),
            }
        }
    }
}

/// One game driven entirely from the command line
async fn run_unattended(
    navigator: &mut Navigator,
    player: &mut dyn MoveController,
    opts: &PlayOptions,
) -> Result<()> {
    let name = opts.name.as_deref().ok_or_else(|| {
        RpsError::InvalidAction("--name is required unless --player=tui".to_string())
    })?;

    navigator.start()?;
    navigator.submit_name(name)?;
    navigator.submit_round_count(opts.rounds.unwrap_or(DEFAULT_TOTAL_ROUNDS))?;

    let result = play_rounds(navigator, player, opts.instant).await?;
    print_results(navigator, &result)
}

fn print_results(navigator: &Navigator, result: &GameResult) -> Result<()> {
    let logger = navigator.logger();
    if logger.output_format() == OutputFormat::Json {
        return logger.summary("results", navigator.session());
    }
    if logger.verbosity() < VerbosityLevel::Minimal {
        return Ok(());
    }

    let session = navigator.session();
    match result.end_reason {
        GameEndReason::Completed => {
            println!("\n=== {} ===", session.verdict().title());
            println!("{}", session.verdict_message());
        }
        GameEndReason::Abandoned => println!("\n=== Game Abandoned ==="),
    }
    println!(
        "Final score: {} {} - {} Computer",
        session.player_name(),
        result.player_score,
        result.computer_score
    );
    display_history(&result.history);
    Ok(())
}

fn run_simulate(games: usize, rounds: u32, seed: u64) -> Result<()> {
    println!("=== Rock Paper Scissors - Simulation ===\n");
    println!("  Games: {games}");
    println!("  Rounds per game: {rounds}");
    println!("  Seed: {seed}");

    let started = Instant::now();
    let stats = run_simulation(SimulationConfig { games, rounds, seed })?;
    stats.print_summary(started.elapsed());
    Ok(())
}
