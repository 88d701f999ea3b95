//! End-of-game scoring

use crate::core::{Card, CardName, Player, PlayerName};
use crate::zones::{Pile, PileKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Victory points for one player, with the cards that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub player: PlayerName,
    pub provinces: usize,
    pub duchies: usize,
    pub estates: usize,
    pub gardens: usize,
    pub curses: usize,
    /// Every card the player owns, used for Gardens
    pub total_cards: usize,
    pub score: i32,
}

impl ScoreBreakdown {
    /// Tally a consolidated deck
    pub fn tally(player: PlayerName, deck: &Pile) -> Self {
        let count = |name| deck.count_of(&Card::new(name));
        let provinces = count(CardName::Province);
        let duchies = count(CardName::Duchy);
        let estates = count(CardName::Estate);
        let gardens = count(CardName::Gardens);
        let curses = count(CardName::Curse);
        let total_cards = deck.len();

        let score = estates as i32 + 3 * duchies as i32 + 6 * provinces as i32 - curses as i32
            + (total_cards / 10 * gardens) as i32;

        ScoreBreakdown {
            player,
            provinces,
            duchies,
            estates,
            gardens,
            curses,
            total_cards,
            score,
        }
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.player)?;
        let parts = [
            (self.provinces, "Provinces"),
            (self.duchies, "Duchies"),
            (self.estates, "Estates"),
            (self.gardens, "Gardens"),
            (self.curses, "Curses"),
        ];
        for (count, label) in parts {
            if count > 0 {
                write!(f, " {count} {label}")?;
            }
        }
        write!(f, " = {}", self.score)
    }
}

impl Player {
    /// Consolidate hand, discard and in-play into the deck, then score it
    pub fn calc_score(&mut self) -> ScoreBreakdown {
        self.transfer(PileKind::Hand, PileKind::Deck);
        self.transfer(PileKind::Discard, PileKind::Deck);
        self.transfer(PileKind::InPlay, PileKind::Deck);
        ScoreBreakdown::tally(self.name.clone(), &self.deck)
    }
}
