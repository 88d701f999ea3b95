//! Read-only views of the game for transports and controllers

use crate::core::{Card, CardName, Player, PlayerId};
use crate::game::resolver::PendingDecision;
use crate::game::supply::CURSE_SLOT;
use crate::game::{GameState, TurnPhase};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One supply slot as seen from outside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyPileView {
    pub slot: usize,
    /// Name of the top card, None when the pile is empty
    pub top: Option<CardName>,
    pub count: usize,
}

impl fmt::Display for SupplyPileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.top {
            Some(name) => write!(f, "{},{}", name, self.count),
            None => write!(f, "Blank,0"),
        }
    }
}

/// Read-only view of the game state from one player's seat
///
/// Everything here is public information except the hand, which is the
/// viewing player's own.
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn player(&self) -> Option<&'a Player> {
        self.game.players.get(self.player_id.seat())
    }

    /// Is it this player's turn?
    pub fn is_active(&self) -> bool {
        self.game.active_id() == self.player_id
    }

    pub fn phase(&self) -> TurnPhase {
        self.game.phase()
    }

    /// The pending decision, if this player is the one who must answer it
    pub fn pending_decision(&self) -> Option<PendingDecision> {
        self.game
            .pending_decision()
            .filter(|pending| pending.player == self.player_id)
    }

    /// Cards in hand, in order
    pub fn hand_cards(&self) -> &'a [Card] {
        self.player()
            .map(|p| p.hand.cards.as_slice())
            .unwrap_or(&[])
    }

    /// Hand as card names, in order
    pub fn hand(&self) -> Vec<CardName> {
        self.hand_cards().iter().map(|c| c.name).collect()
    }

    pub fn actions(&self) -> u32 {
        self.player().map_or(0, |p| p.actions)
    }

    pub fn buys(&self) -> u32 {
        self.player().map_or(0, |p| p.buys)
    }

    pub fn gold(&self) -> u32 {
        self.player().map_or(0, |p| p.gold)
    }

    pub fn deck_count(&self) -> usize {
        self.player().map_or(0, |p| p.deck.len())
    }

    pub fn discard_top(&self) -> Option<CardName> {
        self.player()
            .and_then(|p| p.discard.peek_top())
            .map(|c| c.name)
    }

    pub fn discard_count(&self) -> usize {
        self.player().map_or(0, |p| p.discard.len())
    }

    /// Every supply slot in slot order
    pub fn supply(&self) -> Vec<SupplyPileView> {
        self.game
            .supply
            .piles()
            .enumerate()
            .map(|(slot, pile)| SupplyPileView {
                slot,
                top: pile.peek_top().map(|c| c.name),
                count: pile.len(),
            })
            .collect()
    }

    /// Top card of a supply slot
    pub fn supply_top(&self, slot: usize) -> Option<Card> {
        self.game.supply.slot(slot).and_then(|p| p.peek_top().copied())
    }

    /// Kingdom and basic piles as "name,count" pairs (curses excluded),
    /// joined by commas
    pub fn supply_string(&self) -> String {
        self.supply()
            .iter()
            .filter(|pile| pile.slot != CURSE_SLOT)
            .map(|pile| pile.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn trash_top(&self) -> Option<CardName> {
        self.game.trash.peek_top().map(|c| c.name)
    }

    pub fn trash_count(&self) -> usize {
        self.game.trash.len()
    }

    /// Every card in the trash, bottom first
    pub fn trash_listing(&self) -> Vec<CardName> {
        self.game.trash.iter().map(|c| c.name).collect()
    }

    pub fn curse_count(&self) -> usize {
        self.game.supply.curses.len()
    }
}
