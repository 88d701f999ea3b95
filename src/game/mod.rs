//! Game state, turn engine and effect resolution

pub mod command;
pub mod effects;
pub mod events;
pub mod game_loop;
pub mod logger;
pub mod phase;
pub mod random_controller;
pub mod resolver;
pub mod scoring;
pub mod state;
pub mod supply;
pub mod view;

pub use command::Command;
pub use events::{EventQueue, GameEvent, Notice, NoticeKind, Visibility};
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use phase::{TurnPhase, TurnStructure};
pub use random_controller::RandomController;
pub use resolver::{
    DecisionKind, Frame, GainDestination, GainRule, PendingDecision, Resolver, ResumePoint,
};
pub use scoring::ScoreBreakdown;
pub use state::{GameConfig, GameState};
pub use supply::Supply;
pub use view::{GameStateView, SupplyPileView};
