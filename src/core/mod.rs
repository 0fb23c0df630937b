//! Core game types: moves, outcomes, round records and the session

pub mod moves;
pub mod round;
pub mod session;
pub mod types;

pub use moves::{Move, Outcome};
pub use round::RoundRecord;
pub use session::{Session, Tally, Verdict, DEFAULT_TOTAL_ROUNDS, ROUND_OPTIONS};
pub use types::PlayerName;
