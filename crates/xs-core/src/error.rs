//! Error types for X Spin

use thiserror::Error;

use crate::player::PlayerStatus;

/// Core error type
#[derive(Error, Debug)]
pub enum XsError {
    #[error("Invalid bet amount {amount}: must be between {min} and {max}")]
    InvalidBetAmount { amount: u64, min: u64, max: u64 },

    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Amount {0} exceeds the balance store's delta range")]
    AmountOverflow(u64),

    #[error("Invalid segment set: a wheel needs at least one segment")]
    InvalidSegmentSet,

    #[error("Invalid bet status: expected {expected:?}, found {actual:?}")]
    InvalidBetStatus {
        expected: PlayerStatus,
        actual: PlayerStatus,
    },

    #[error("Operation '{operation}' not allowed during {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: String,
    },

    #[error("Room is closed")]
    RoomClosed,

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

impl XsError {
    /// Errors the player can fix by retrying with different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidBetAmount { .. } | Self::InsufficientFunds { .. }
        )
    }
}

/// Result type alias
pub type XsResult<T> = Result<T, XsError>;
