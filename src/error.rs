//! Error types for the Dominion engine
//!
//! These are structural failures: inputs a conforming transport should never
//! send. Rule violations by a player (bad index, not enough coins, ...) are
//! reported as private game events instead and never surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DominionError {
    #[error("Invalid player count: {0} (expected 2 to 4)")]
    InvalidPlayerCount(usize),

    #[error("Invalid kingdom: {0}")]
    InvalidKingdom(String),

    #[error("Index {index} out of range for pile of {len} cards")]
    OutOfRange { index: usize, len: usize },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("No effect is waiting for input")]
    NoPendingEffect,

    #[error("An effect is waiting for input; only payloads are accepted")]
    EffectPending,

    #[error("{0} has no action effect")]
    NotAnAction(String),

    #[error("Effect frame for {0} resumed without a payload")]
    MissingPayload(String),

    #[error("The game is over")]
    GameOver,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DominionError {
    fn from(err: serde_json::Error) -> Self {
        DominionError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DominionError>;
