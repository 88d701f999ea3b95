//! Card types and definitions

use crate::core::CardName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card types in the base game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Treasure,
    Victory,
    Action,
    Curse,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardType::Treasure => "Treasure",
            CardType::Victory => "Victory",
            CardType::Action => "Action",
            CardType::Curse => "Curse",
        };
        f.write_str(s)
    }
}

/// An immutable card value
///
/// Cards carry no identity: two cards are equal iff name, type and cost all
/// match. Piles hold copies, and lookups like "is there a Moat in hand" are
/// linear scans with this equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Card name (e.g., "Throne Room")
    pub name: CardName,

    pub card_type: CardType,

    /// Price in coins
    pub cost: u8,
}

impl Card {
    /// Canonical definition of a named card
    pub fn new(name: CardName) -> Self {
        use CardName::*;
        let (card_type, cost) = match name {
            Copper => (CardType::Treasure, 0),
            Silver => (CardType::Treasure, 3),
            Gold => (CardType::Treasure, 6),
            Estate => (CardType::Victory, 2),
            Duchy => (CardType::Victory, 5),
            Province => (CardType::Victory, 8),
            Curse => (CardType::Curse, 0),
            Cellar | Chapel | Moat => (CardType::Action, 2),
            Chancellor | Village | Woodcutter | Workshop => (CardType::Action, 3),
            Gardens => (CardType::Victory, 4),
            Bureaucrat | Feast | Militia | Moneylender | Remodel | Smithy | Spy | Thief
            | ThroneRoom => (CardType::Action, 4),
            CouncilRoom | Festival | Laboratory | Library | Market | Mine | Witch => {
                (CardType::Action, 5)
            }
            Adventurer => (CardType::Action, 6),
        };
        Card {
            name,
            card_type,
            cost,
        }
    }

    /// Stamp `count` copies of a named card
    pub fn copies(name: CardName, count: usize) -> Vec<Card> {
        vec![Card::new(name); count]
    }

    pub fn is_type(&self, card_type: CardType) -> bool {
        self.card_type == card_type
    }

    pub fn is_action(&self) -> bool {
        self.is_type(CardType::Action)
    }

    pub fn is_treasure(&self) -> bool {
        self.is_type(CardType::Treasure)
    }

    pub fn is_victory(&self) -> bool {
        self.is_type(CardType::Victory)
    }

    /// Coins produced when played (0 for non-treasures)
    pub fn treasure_value(&self) -> u32 {
        match self.name {
            CardName::Copper => 1,
            CardName::Silver => 2,
            CardName::Gold => 3,
            _ => 0,
        }
    }

    /// Attack cards are blockable by a Moat in the target's hand
    pub fn is_attack(&self) -> bool {
        matches!(
            self.name,
            CardName::Bureaucrat
                | CardName::Militia
                | CardName::Spy
                | CardName::Thief
                | CardName::Witch
        )
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
