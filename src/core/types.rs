//! Strongly-typed wrappers for game concepts
//!
//! This module provides newtypes to prevent type confusion and make the code
//! more self-documenting. Seats, player names and card names each get their
//! own type so they cannot be mixed up with bare integers or strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seat of a player at the table (0-based, fixed for the whole match)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(usize);

impl PlayerId {
    pub fn new(seat: usize) -> Self {
        PlayerId(seat)
    }

    pub fn seat(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// Player name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}

/// Every card name known to the engine: basic supply cards plus the
/// 25 kingdom randomizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardName {
    // Basic supply
    Copper,
    Silver,
    Gold,
    Estate,
    Duchy,
    Province,
    Curse,

    // Kingdom
    Cellar,
    Chapel,
    Moat,
    Chancellor,
    Village,
    Woodcutter,
    Workshop,
    Bureaucrat,
    Feast,
    Gardens,
    Militia,
    Moneylender,
    Remodel,
    Smithy,
    Spy,
    Thief,
    ThroneRoom,
    CouncilRoom,
    Festival,
    Laboratory,
    Library,
    Market,
    Mine,
    Witch,
    Adventurer,
}

impl CardName {
    /// The kingdom randomizer pool, in cost order
    pub const KINGDOM: [CardName; 25] = [
        CardName::Cellar,
        CardName::Chapel,
        CardName::Moat,
        CardName::Chancellor,
        CardName::Village,
        CardName::Woodcutter,
        CardName::Workshop,
        CardName::Bureaucrat,
        CardName::Feast,
        CardName::Gardens,
        CardName::Militia,
        CardName::Moneylender,
        CardName::Remodel,
        CardName::Smithy,
        CardName::Spy,
        CardName::Thief,
        CardName::ThroneRoom,
        CardName::CouncilRoom,
        CardName::Festival,
        CardName::Laboratory,
        CardName::Library,
        CardName::Market,
        CardName::Mine,
        CardName::Witch,
        CardName::Adventurer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardName::Copper => "Copper",
            CardName::Silver => "Silver",
            CardName::Gold => "Gold",
            CardName::Estate => "Estate",
            CardName::Duchy => "Duchy",
            CardName::Province => "Province",
            CardName::Curse => "Curse",
            CardName::Cellar => "Cellar",
            CardName::Chapel => "Chapel",
            CardName::Moat => "Moat",
            CardName::Chancellor => "Chancellor",
            CardName::Village => "Village",
            CardName::Woodcutter => "Woodcutter",
            CardName::Workshop => "Workshop",
            CardName::Bureaucrat => "Bureaucrat",
            CardName::Feast => "Feast",
            CardName::Gardens => "Gardens",
            CardName::Militia => "Militia",
            CardName::Moneylender => "Moneylender",
            CardName::Remodel => "Remodel",
            CardName::Smithy => "Smithy",
            CardName::Spy => "Spy",
            CardName::Thief => "Thief",
            CardName::ThroneRoom => "Throne Room",
            CardName::CouncilRoom => "Council Room",
            CardName::Festival => "Festival",
            CardName::Laboratory => "Laboratory",
            CardName::Library => "Library",
            CardName::Market => "Market",
            CardName::Mine => "Mine",
            CardName::Witch => "Witch",
            CardName::Adventurer => "Adventurer",
        }
    }

    pub fn is_kingdom(&self) -> bool {
        Self::KINGDOM.contains(self)
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        CardName::KINGDOM
            .iter()
            .chain(
                [
                    CardName::Copper,
                    CardName::Silver,
                    CardName::Gold,
                    CardName::Estate,
                    CardName::Duchy,
                    CardName::Province,
                    CardName::Curse,
                ]
                .iter(),
            )
            .find(|name| name.as_str().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| format!("unknown card name '{s}'"))
    }
}
