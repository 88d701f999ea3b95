//! Card piles (deck, hand, discard, in play, supply stacks, trash)

use crate::core::Card;
use crate::{DominionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four piles every player owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Deck,
    Hand,
    Discard,
    InPlay,
}

impl fmt::Display for PileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PileKind::Deck => "deck",
            PileKind::Hand => "hand",
            PileKind::Discard => "discard pile",
            PileKind::InPlay => "in play",
        };
        f.write_str(s)
    }
}

/// An ordered stack of cards; the top is the end of the vector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    /// Cards in this pile, bottom first
    pub cards: Vec<Card>,
}

impl Pile {
    pub fn new() -> Self {
        Pile { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Pile { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards equal (by value) to `card`
    pub fn count_of(&self, card: &Card) -> usize {
        self.cards.iter().filter(|c| *c == card).count()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.iter().any(|c| c == card)
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Shuffle the pile
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    /// Append cards on top, in iteration order
    pub fn add(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Put a single card on top
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Take the top card, if any
    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove the top card; fails on an empty pile
    pub fn remove_top(&mut self) -> Result<Card> {
        self.cards
            .pop()
            .ok_or(DominionError::OutOfRange { index: 0, len: 0 })
    }

    /// Remove the card at `index` (0 = bottom)
    pub fn remove_at(&mut self, index: usize) -> Result<Card> {
        if index >= self.cards.len() {
            return Err(DominionError::OutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }

    /// Remove the topmost card equal to `card`
    pub fn remove_last_matching(&mut self, card: &Card) -> Option<Card> {
        let pos = self.cards.iter().rposition(|c| c == card)?;
        Some(self.cards.remove(pos))
    }

    /// Drain the pile, returning everything bottom first
    pub fn remove_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}
