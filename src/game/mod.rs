//! Stage navigation, round resolution and move controllers

pub mod controller;
pub mod engine;
pub mod game_loop;
pub mod interactive_controller;
pub mod logger;
pub mod navigator;
pub mod random_controller;
pub mod scripted_controller;
pub mod stage;

pub use controller::{MoveController, SessionView};
pub use engine::{EngineState, PendingTimer, RoundEngine, RoundEvent, RoundTiming, TimerKind};
pub use game_loop::{GameEndReason, GameLoop, GameResult};
pub use interactive_controller::{InteractiveController, ResultsChoice};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use navigator::Navigator;
pub use random_controller::RandomController;
pub use scripted_controller::ScriptedController;
pub use stage::Stage;
