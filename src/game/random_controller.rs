//! Random AI controller for testing and baseline gameplay
//!
//! Answers every decision with a random legal choice, and buys with a bias
//! toward money and Provinces so that simulated games actually end.

use crate::core::{CardName, CardType, PlayerId};
use crate::game::resolver::{DecisionKind, PendingDecision};
use crate::game::supply::CURSE_SLOT;
use crate::game::view::GameStateView;
use crate::game::{Command, GameEvent, GameState, ScoreBreakdown, Supply, TurnPhase};
use crate::Result;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// A controller that makes random choices
pub struct RandomController {
    player_id: PlayerId,
    rng: ChaCha12Rng,
}

impl RandomController {
    /// Create a new random controller seeded from OS entropy
    pub fn new(player_id: PlayerId) -> Self {
        RandomController {
            player_id,
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        RandomController {
            player_id,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Pick the next input for this player: a payload if a decision is
    /// waiting on them, otherwise a top-level command
    pub fn choose(&mut self, view: &GameStateView) -> Command {
        if let Some(pending) = view.pending_decision() {
            return Command::Payload(self.answer(view, &pending));
        }
        if view.phase() != TurnPhase::AwaitingCommand || !view.is_active() {
            return Command::EndTurn;
        }
        self.choose_command(view)
    }

    fn choose_command(&mut self, view: &GameStateView) -> Command {
        let hand = view.hand_cards();

        if view.actions() > 0 {
            let actions: Vec<usize> = (0..hand.len()).filter(|&i| hand[i].is_action()).collect();
            if let Some(&index) = actions.choose(&mut self.rng) {
                return Command::PlayCard(index);
            }
        }
        if hand.iter().any(|c| c.is_treasure()) {
            return Command::PlayAllTreasures;
        }
        if view.buys() == 0 {
            return Command::EndTurn;
        }

        let gold = view.gold();
        for (name, threshold) in [(CardName::Province, 8), (CardName::Gold, 6)] {
            if gold >= threshold {
                if let Some(slot) = Supply::basic_slot(name) {
                    if view.supply_top(slot).is_some() {
                        return Command::BuyCard(slot);
                    }
                }
            }
        }

        let affordable: Vec<usize> = view
            .supply()
            .iter()
            .filter(|pile| pile.slot != CURSE_SLOT)
            .filter_map(|pile| {
                let card = view.supply_top(pile.slot)?;
                (card.cost >= 2 && u32::from(card.cost) <= gold).then_some(pile.slot)
            })
            .collect();
        match affordable.choose(&mut self.rng) {
            Some(&slot) if self.rng.gen_bool(0.8) => Command::BuyCard(slot),
            _ => Command::EndTurn,
        }
    }

    fn answer(&mut self, view: &GameStateView, pending: &PendingDecision) -> String {
        let hand = view.hand_cards();
        let mut indices: Vec<usize> = (0..hand.len()).collect();

        let chosen: Vec<usize> = match &pending.kind {
            DecisionKind::DiscardAny => indices
                .into_iter()
                .filter(|_| self.rng.gen_bool(0.5))
                .collect(),
            DecisionKind::TrashUpTo(limit) => {
                // Only junk, so the deck keeps its money
                let mut junk: Vec<usize> = indices
                    .into_iter()
                    .filter(|&i| matches!(hand[i].name, CardName::Curse | CardName::Estate))
                    .collect();
                junk.shuffle(&mut self.rng);
                let count = self.rng.gen_range(0..=(*limit).min(junk.len()));
                junk.truncate(count);
                junk
            }
            DecisionKind::DiscardDownTo(keep) => {
                indices.shuffle(&mut self.rng);
                indices.truncate(hand.len().saturating_sub(*keep));
                indices
            }
            DecisionKind::HandIndex(wanted) => {
                let candidates: Vec<usize> = indices
                    .into_iter()
                    .filter(|&i| wanted.map_or(true, |t: CardType| hand[i].is_type(t)))
                    .collect();
                candidates.choose(&mut self.rng).into_iter().copied().collect()
            }
            DecisionKind::Gain(rule) => {
                let candidates: Vec<usize> = view
                    .supply()
                    .iter()
                    .filter(|pile| view.supply_top(pile.slot).is_some_and(|c| rule.admits(&c)))
                    .map(|pile| pile.slot)
                    .collect();
                candidates.choose(&mut self.rng).into_iter().copied().collect()
            }
            DecisionKind::Binary => vec![self.rng.gen_range(0..2)],
        };

        chosen
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Drive a game with one controller per seat until it ends, returning the
/// final scores, or None if `max_commands` inputs were not enough. Events are
/// drained after every input.
pub fn play_out(
    game: &mut GameState,
    controllers: &mut [RandomController],
    max_commands: usize,
) -> Result<Option<Vec<ScoreBreakdown>>> {
    for _ in 0..max_commands {
        let actor = game.next_actor();
        let Some(controller) = controllers.get_mut(actor.seat()) else {
            return Err(crate::DominionError::OutOfRange {
                index: actor.seat(),
                len: controllers.len(),
            });
        };
        let command = controller.choose(&GameStateView::new(game, actor));
        game.submit(command)?;

        for event in game.drain_events() {
            if let GameEvent::EndGame(scores) = event {
                return Ok(Some(scores));
            }
        }
    }
    Ok(None)
}
