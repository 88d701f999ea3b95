//! Player representation

use crate::core::{Card, CardName, PlayerId, PlayerName};
use crate::zones::{Pile, PileKind};
use serde::{Deserialize, Serialize};

/// Cards drawn at the end of every turn
pub const HAND_SIZE: usize = 5;

/// Represents a player in the game
///
/// A player exclusively owns four piles; together they partition every card
/// the player owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Seat at the table
    pub id: PlayerId,

    pub name: PlayerName,

    pub deck: Pile,
    pub hand: Pile,
    pub discard: Pile,
    pub in_play: Pile,

    /// Actions remaining this turn
    pub actions: u32,

    /// Buys remaining this turn
    pub buys: u32,

    /// Coins available this turn
    pub gold: u32,
}

impl Player {
    /// Create a player with four empty piles
    pub fn new(id: PlayerId, name: impl Into<PlayerName>) -> Self {
        Player {
            id,
            name: name.into(),
            deck: Pile::new(),
            hand: Pile::new(),
            discard: Pile::new(),
            in_play: Pile::new(),
            actions: 0,
            buys: 0,
            gold: 0,
        }
    }

    /// Create a player holding the starting deck (7 Copper, 3 Estate),
    /// shuffled, with an opening hand drawn
    pub fn with_starting_deck(
        id: PlayerId,
        name: impl Into<PlayerName>,
        rng: &mut impl rand::Rng,
    ) -> Self {
        let mut player = Player::new(id, name);
        player.deck.add(Card::copies(CardName::Estate, 3));
        player.deck.add(Card::copies(CardName::Copper, 7));
        player.deck.shuffle(rng);
        player.draw_hand(rng);
        player
    }

    pub fn pile(&self, kind: PileKind) -> &Pile {
        match kind {
            PileKind::Deck => &self.deck,
            PileKind::Hand => &self.hand,
            PileKind::Discard => &self.discard,
            PileKind::InPlay => &self.in_play,
        }
    }

    pub fn pile_mut(&mut self, kind: PileKind) -> &mut Pile {
        match kind {
            PileKind::Deck => &mut self.deck,
            PileKind::Hand => &mut self.hand,
            PileKind::Discard => &mut self.discard,
            PileKind::InPlay => &mut self.in_play,
        }
    }

    /// Move every card of one pile on top of another
    pub fn transfer(&mut self, from: PileKind, to: PileKind) {
        let cards = self.pile_mut(from).remove_all();
        self.pile_mut(to).add(cards);
    }

    /// Shuffle the discard pile into the deck. Returns false if there was
    /// nothing to shuffle.
    pub fn reshuffle(&mut self, rng: &mut impl rand::Rng) -> bool {
        if self.discard.is_empty() {
            return false;
        }
        self.transfer(PileKind::Discard, PileKind::Deck);
        self.deck.shuffle(rng);
        true
    }

    /// Take the top card of the deck, reshuffling the discard pile into it
    /// first if the deck is empty. Returns None when both are exhausted.
    pub fn take_from_deck(&mut self, rng: &mut impl rand::Rng) -> Option<Card> {
        if self.deck.is_empty() && !self.reshuffle(rng) {
            return None;
        }
        self.deck.pop_top()
    }

    /// Peek at the top of the deck, reshuffling first if the deck is empty
    pub fn reveal_top(&mut self, rng: &mut impl rand::Rng) -> Option<Card> {
        if self.deck.is_empty() && !self.reshuffle(rng) {
            return None;
        }
        self.deck.peek_top().copied()
    }

    /// Draw one card into hand. Drawing from two empty sources yields
    /// nothing and is not an error.
    pub fn draw(&mut self, rng: &mut impl rand::Rng) -> Option<Card> {
        let card = self.take_from_deck(rng)?;
        self.hand.push(card);
        Some(card)
    }

    /// Draw up to `count` cards, returning how many were drawn
    pub fn draw_many(&mut self, count: usize, rng: &mut impl rand::Rng) -> usize {
        (0..count).take_while(|_| self.draw(rng).is_some()).count()
    }

    pub fn draw_hand(&mut self, rng: &mut impl rand::Rng) -> usize {
        self.draw_many(HAND_SIZE, rng)
    }

    /// Reset per-turn counters to one action, one buy, no coins
    pub fn start_turn(&mut self) {
        self.actions = 1;
        self.buys = 1;
        self.gold = 0;
    }

    /// Clean up: hand and in-play go to discard, then draw the next hand
    pub fn end_turn(&mut self, rng: &mut impl rand::Rng) {
        self.transfer(PileKind::Hand, PileKind::Discard);
        self.transfer(PileKind::InPlay, PileKind::Discard);
        self.draw_hand(rng);
    }

    /// Does the hand hold a Moat?
    pub fn has_moat(&self) -> bool {
        self.hand.contains(&Card::new(CardName::Moat))
    }

    /// Total number of cards owned across all four piles
    pub fn owned_card_count(&self) -> usize {
        self.deck.len() + self.hand.len() + self.discard.len() + self.in_play.len()
    }

    /// Every owned card, pile by pile
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard.iter())
            .chain(self.in_play.iter())
    }
}
