//! Dominion engine - turn-based deck-building for 2 to 4 players
//!
//! The engine is a synchronous state machine. A transport feeds it one
//! command at a time; action-card effects that need a decision suspend on an
//! explicit frame stack and resume when the next payload arrives. Everything
//! the engine has to say comes back as an ordered queue of game events.

pub mod core;
pub mod error;
pub mod game;
pub mod zones;

pub use error::{DominionError, Result};
