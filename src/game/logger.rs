//! Engine diagnostics logger
//!
//! Game events meant for players go to the event queue. This logger is for
//! the engine's own narration: turn changes, resolver frames being pushed and
//! popped, and rejected inputs. It writes to stdout, to an in-memory buffer,
//! or both.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt;

/// Verbosity level for engine output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// No output at all
    Silent = 0,
    /// Game start and end only
    Minimal = 1,
    /// Turns and rejected inputs
    #[default]
    Normal = 2,
    /// Every resolver step
    Verbose = 3,
}

impl std::str::FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Where narration goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Buffer only, nothing printed
    Memory,
    Both,
}

/// One captured line of narration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            VerbosityLevel::Minimal => write!(f, "{}", self.message),
            _ => write!(f, "  {}", self.message),
        }
    }
}

/// Narration sink shared by the engine
///
/// Only the settings survive a snapshot; the buffer starts empty again after
/// a restore, and a cloned game gets a logger with an empty buffer.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    #[serde(skip)]
    captured: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..Self::default()
        }
    }

    /// Builder form of choosing the output destination
    pub fn with_output(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Captured entries, oldest first
    pub fn logs(&self) -> Ref<'_, [LogEntry]> {
        Ref::map(self.captured.borrow(), Vec::as_slice)
    }

    /// Hand over everything captured so far and start a fresh buffer
    pub fn take_logs(&self) -> Vec<LogEntry> {
        self.captured.take()
    }

    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }

    fn log(&self, level: VerbosityLevel, message: &str) {
        if level > self.verbosity {
            return;
        }
        let entry = LogEntry {
            level,
            message: message.to_string(),
        };
        if self.output_mode != OutputMode::Memory {
            println!("{entry}");
        }
        if self.is_capturing() {
            self.captured.borrow_mut().push(entry);
        }
    }
}

impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            captured: RefCell::default(),
        }
    }
}
