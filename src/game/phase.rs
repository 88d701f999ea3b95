//! Turn engine states and turn bookkeeping

use crate::core::PlayerId;
use serde::{Deserialize, Serialize};

/// Where the turn engine is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for a top-level command from the active player
    AwaitingCommand,
    /// An action effect is suspended; inputs are resolver payloads
    ResolvingEffect,
    /// Scores have been emitted; no further input is accepted
    GameOver,
}

/// Represents the current turn structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Current turn number (starts at 1, counts every player's turn)
    pub turn_number: u32,

    /// Active player (whose turn it is)
    pub active_player: PlayerId,

    pub phase: TurnPhase,
}

impl TurnStructure {
    pub fn new(starting_player: PlayerId) -> Self {
        TurnStructure {
            turn_number: 1,
            active_player: starting_player,
            phase: TurnPhase::AwaitingCommand,
        }
    }

    /// Hand the turn to the next seat, wrapping around the table
    pub fn next_turn(&mut self, player_count: usize) {
        let next = (self.active_player.seat() + 1) % player_count;
        self.active_player = PlayerId::new(next);
        self.turn_number += 1;
        self.phase = TurnPhase::AwaitingCommand;
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }
}
