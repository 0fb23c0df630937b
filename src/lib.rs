//! RPS Arena - Rock-Paper-Scissors game engine
//!
//! A stage sequencer (landing, name entry, setup, play, results) over a
//! single game session, with a timed round-resolution engine and a text
//! front end.

pub mod core;
pub mod error;
pub mod game;
pub mod simulate;

pub use error::{Result, RpsError};
