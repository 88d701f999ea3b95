//! Outbound game events
//!
//! The engine never talks to connections directly. Every observable thing it
//! does is appended to an [`EventQueue`] as a [`GameEvent`] tagged with who may
//! see it; the transport drains the queue after each input and fans events
//! out to viewers.

use crate::core::{PlayerId, PlayerName};
use crate::game::scoring::ScoreBreakdown;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Who may see an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Broadcast to everybody
    Public,
    /// Only the named player
    Private(PlayerName),
    /// Final scores; ends the match
    EndGame,
}

/// What a notice is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// Plain narration of something that happened
    Info,
    /// A new turn starts for the named player
    Turn,
    /// A recoverable usage error; the same decision is still open
    Error,
    /// Prompt: choose card(s) from hand
    Select,
    /// Prompt: binary choice; payload "0" picks `first`, "1" picks `second`
    Decision { first: String, second: String },
    /// Prompt: choose a supply pile to gain from
    Gain,
    /// Prompt: discard card(s) from hand
    Discard,
    /// The acting player is waiting on somebody else's decision
    Waiting,
    /// The acting player's effect continues
    Resume,
}

impl NoticeKind {
    fn tag(&self) -> &'static str {
        match self {
            NoticeKind::Info => "Info",
            NoticeKind::Turn => "Turn",
            NoticeKind::Error => "Error",
            NoticeKind::Select => "Select",
            NoticeKind::Decision { .. } => "Decision",
            NoticeKind::Gain => "Gain",
            NoticeKind::Discard => "Discard",
            NoticeKind::Waiting => "Suspend",
            NoticeKind::Resume => "Resume",
        }
    }
}

/// A human-readable message plus its kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// One event record in the outbound queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Public(Notice),
    Private {
        player: PlayerId,
        name: PlayerName,
        notice: Notice,
    },
    /// Final per-player score breakdowns, in seating order
    EndGame(Vec<ScoreBreakdown>),
}

impl GameEvent {
    pub fn visibility(&self) -> Visibility {
        match self {
            GameEvent::Public(_) => Visibility::Public,
            GameEvent::Private { name, .. } => Visibility::Private(name.clone()),
            GameEvent::EndGame(_) => Visibility::EndGame,
        }
    }

    /// The notice carried by this event (None for end-of-game scores)
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            GameEvent::Public(notice) | GameEvent::Private { notice, .. } => Some(notice),
            GameEvent::EndGame(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.notice(), Some(Notice { kind: NoticeKind::Error, .. }))
    }

    /// Should `player` see this event?
    pub fn is_visible_to(&self, player: PlayerId) -> bool {
        match self {
            GameEvent::Private { player: target, .. } => *target == player,
            _ => true,
        }
    }
}

/// Renders the line-oriented wire protocol
impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Public(Notice {
                kind: NoticeKind::Turn,
                text,
            }) => write!(f, "Turn:{text}"),
            GameEvent::Public(notice) => write!(f, "Public:{}", notice.text),
            GameEvent::Private { name, notice, .. } => {
                write!(f, "Private:{}:{}:{}", name, notice.kind.tag(), notice.text)?;
                if let NoticeKind::Decision { first, second } = &notice.kind {
                    write!(f, ":{first}:{second}")?;
                }
                Ok(())
            }
            GameEvent::EndGame(scores) => {
                let lines: Vec<String> = scores.iter().map(|s| s.to_string()).collect();
                write!(f, "End Game:{}", lines.join(" | "))
            }
        }
    }
}

/// FIFO of events waiting to be consumed by the transport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue {
            events: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub fn public(&mut self, text: impl Into<String>) {
        self.push(GameEvent::Public(Notice {
            kind: NoticeKind::Info,
            text: text.into(),
        }));
    }

    pub fn private(
        &mut self,
        player: PlayerId,
        name: &PlayerName,
        kind: NoticeKind,
        text: impl Into<String>,
    ) {
        self.push(GameEvent::Private {
            player,
            name: name.clone(),
            notice: Notice {
                kind,
                text: text.into(),
            },
        });
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
