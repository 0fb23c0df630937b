//! Error types for RPS Arena

use crate::game::Stage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpsError {
    #[error("Please enter your name to continue")]
    InvalidName,

    #[error("Invalid round count: {0} (must be at least 1)")]
    InvalidRoundCount(u32),

    #[error("Cannot {action} while in the {stage} stage")]
    InvalidTransition { stage: Stage, action: &'static str },

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Session invariant violated: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RpsError {
    /// True for errors the player can fix by re-entering input
    pub fn is_validation(&self) -> bool {
        matches!(self, RpsError::InvalidName | RpsError::InvalidRoundCount(_))
    }
}

pub type Result<T> = std::result::Result<T, RpsError>;
