//! Turn engine
//!
//! Processes one input at a time to completion. Top-level commands are only
//! accepted while no effect is pending; while an effect is suspended every
//! input is a payload for the resolver. Turns rotate through the table until
//! the supply reports the game over.

use crate::core::CardType;
use crate::game::events::{GameEvent, Notice, NoticeKind};
use crate::game::{Command, GameState, TurnPhase};
use crate::{DominionError, Result};

impl GameState {
    /// Parse and apply a raw transport token
    pub fn submit_token(&mut self, token: &str) -> Result<()> {
        let resolving = self.phase() == TurnPhase::ResolvingEffect;
        let command = Command::parse(token, resolving)?;
        self.submit(command)
    }

    /// Apply one command for the active player
    ///
    /// Rule violations are reported as private `Error` events and return
    /// `Ok`; an `Err` means the input could not have come from a conforming
    /// transport and nothing was changed.
    pub fn submit(&mut self, command: Command) -> Result<()> {
        match (self.phase(), command) {
            (TurnPhase::GameOver, _) => Err(DominionError::GameOver),
            (TurnPhase::ResolvingEffect, Command::Payload(raw)) => {
                self.resume_effect(&raw)?;
                self.sync_phase();
                Ok(())
            }
            (TurnPhase::ResolvingEffect, _) => Err(DominionError::EffectPending),
            (TurnPhase::AwaitingCommand, Command::Payload(_)) => {
                Err(DominionError::NoPendingEffect)
            }
            (TurnPhase::AwaitingCommand, Command::PlayAllTreasures) => self.play_all_treasures(),
            (TurnPhase::AwaitingCommand, Command::EndTurn) => self.end_turn(),
            (TurnPhase::AwaitingCommand, Command::PlayCard(index)) => self.play_card(index),
            (TurnPhase::AwaitingCommand, Command::BuyCard(index)) => self.buy_card(index),
        }
    }

    fn sync_phase(&mut self) {
        if self.turn.phase != TurnPhase::GameOver {
            self.turn.phase = if self.resolver.is_resolved() {
                TurnPhase::AwaitingCommand
            } else {
                TurnPhase::ResolvingEffect
            };
        }
    }

    /// Reset counters for the active player and announce the turn
    pub(crate) fn begin_turn(&mut self) {
        let active = self.turn.active_player;
        let name = self.name_of(active);
        if let Some(player) = self.players.get_mut(active.seat()) {
            player.start_turn();
        }
        self.logger
            .normal(&format!("turn {}: {}", self.turn.turn_number, name));
        self.events.push(GameEvent::Public(Notice {
            kind: NoticeKind::Turn,
            text: name,
        }));
    }

    fn play_card(&mut self, index: usize) -> Result<()> {
        let actor = self.active_id();
        let seat = actor.seat();
        let player = self.player(actor)?;
        let (card, actions) = (player.hand.get(index).copied(), player.actions);

        let Some(card) = card else {
            self.reject(actor, "That card is not in your hand, try again!");
            return Ok(());
        };
        match card.card_type {
            CardType::Victory => {
                self.reject(actor, "You cannot play a victory card, try again!");
                return Ok(());
            }
            CardType::Curse => {
                self.reject(actor, "You cannot play a Curse, try again!");
                return Ok(());
            }
            CardType::Action if actions == 0 => {
                self.reject(actor, "You have no more actions, try again!");
                return Ok(());
            }
            CardType::Action | CardType::Treasure => {}
        }

        let player = &mut self.players[seat];
        let card = player.hand.remove_at(index)?;
        player.in_play.push(card);

        if card.is_treasure() {
            // Playing money closes the action phase
            player.gold += card.treasure_value();
            player.actions = 0;
            let name = player.name.to_string();
            self.announce(format!("{name} played a {card}."));
            return Ok(());
        }

        player.actions -= 1;
        let depth = self.resolver.depth();
        if let Err(err) = self.start_effect(card, actor) {
            // Undo the play
            while self.resolver.depth() > depth {
                self.resolver.pop();
            }
            let player = &mut self.players[seat];
            if let Some(card) = player.in_play.remove_last_matching(&card) {
                player.hand.cards.insert(index, card);
            }
            player.actions += 1;
            self.sync_phase();
            return Err(err);
        }
        self.sync_phase();
        Ok(())
    }

    fn play_all_treasures(&mut self) -> Result<()> {
        let seat = self.active_id().seat();
        let mut index = 0;
        while let Some(card) = self.players[seat].hand.get(index) {
            if card.is_treasure() {
                self.play_card(index)?;
            } else {
                index += 1;
            }
        }
        Ok(())
    }

    fn buy_card(&mut self, slot: usize) -> Result<()> {
        let actor = self.active_id();
        let seat = actor.seat();
        let player = self.player(actor)?;
        let (buys, gold) = (player.buys, player.gold);

        if buys == 0 {
            self.reject(actor, "You have no more buys.");
            return Ok(());
        }
        let top = match self.supply.slot(slot) {
            Some(pile) => pile.peek_top().copied(),
            None => {
                self.reject(actor, "That is not a supply pile, try again!");
                return Ok(());
            }
        };
        let Some(top) = top else {
            self.reject(actor, "The supply pile for that card is empty, try again!");
            return Ok(());
        };
        if u32::from(top.cost) > gold {
            self.reject(actor, "You cannot afford that card, try again!");
            return Ok(());
        }

        let slots = self.supply.slot_count();
        let card = self
            .supply
            .slot_mut(slot)
            .and_then(|pile| pile.pop_top())
            .ok_or(DominionError::OutOfRange {
                index: slot,
                len: slots,
            })?;
        let player = &mut self.players[seat];
        player.discard.push(card);
        player.gold -= u32::from(card.cost);
        player.buys -= 1;
        player.actions = 0;
        let buys_left = player.buys;
        let name = player.name.to_string();
        self.announce(format!("{name} bought a {card}."));

        if buys_left == 0 {
            self.end_turn()?;
        }
        Ok(())
    }

    fn end_turn(&mut self) -> Result<()> {
        let actor = self.active_id();
        self.with_player_rng(actor, |player, rng| player.end_turn(rng))?;

        if self.supply.is_game_over() {
            self.finish_game();
            return Ok(());
        }
        self.turn.next_turn(self.players.len());
        self.begin_turn();
        Ok(())
    }

    fn finish_game(&mut self) {
        let scores: Vec<_> = self.players.iter_mut().map(|p| p.calc_score()).collect();
        let summary: Vec<String> = scores
            .iter()
            .map(|s| format!("{} {}", s.player, s.score))
            .collect();
        self.logger.minimal(&format!(
            "game over after {} turns: {}",
            self.turn.turn_number,
            summary.join(", ")
        ));
        self.events.push(GameEvent::EndGame(scores));
        self.turn.phase = TurnPhase::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardName, PlayerId};
    use crate::game::{GameConfig, VerbosityLevel};
    use crate::zones::Pile;

    fn game() -> GameState {
        let config = GameConfig::new()
            .with_seed(3)
            .with_kingdom(&CardName::KINGDOM[15..])
            .with_verbosity(VerbosityLevel::Silent);
        let mut game = GameState::with_config(&["Alice", "Bob"], &config).unwrap();
        game.drain_events();
        game
    }

    fn set_hand(game: &mut GameState, seat: usize, cards: &[CardName]) {
        game.players[seat].hand = Pile::from_cards(cards.iter().map(|&n| Card::new(n)).collect());
    }

    #[test]
    fn test_play_treasure_zeroes_actions() {
        let mut game = game();
        set_hand(&mut game, 0, &[CardName::Silver, CardName::Festival]);

        game.submit(Command::PlayCard(0)).unwrap();

        let alice = &game.players[0];
        assert_eq!(alice.gold, 2);
        assert_eq!(alice.actions, 0);
        assert_eq!(alice.in_play.len(), 1);
    }

    #[test]
    fn test_action_rejected_without_actions() {
        let mut game = game();
        set_hand(&mut game, 0, &[CardName::Copper, CardName::Smithy]);
        game.submit(Command::PlayCard(0)).unwrap();
        game.drain_events();
        let hand = game.players[0].hand.clone();
        let in_play = game.players[0].in_play.clone();

        game.submit(Command::PlayCard(0)).unwrap();

        let alice = &game.players[0];
        assert_eq!(alice.hand, hand);
        assert_eq!(alice.in_play, in_play);
        assert_eq!((alice.actions, alice.buys, alice.gold), (0, 1, 1));
        let events = game.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].to_string(),
            "Private:Alice:Error:You have no more actions, try again!"
        );
    }

    #[test]
    fn test_victory_and_curse_cannot_be_played() {
        let mut game = game();
        set_hand(&mut game, 0, &[CardName::Estate, CardName::Curse]);

        game.submit(Command::PlayCard(0)).unwrap();
        game.submit(Command::PlayCard(1)).unwrap();
        game.submit(Command::PlayCard(9)).unwrap();

        assert_eq!(game.players[0].hand.len(), 2);
        assert!(game.drain_events().iter().all(|e| e.is_error()));
    }

    #[test]
    fn test_play_all_treasures() {
        let mut game = game();
        set_hand(
            &mut game,
            0,
            &[CardName::Copper, CardName::Estate, CardName::Gold, CardName::Silver],
        );

        game.submit(Command::PlayAllTreasures).unwrap();

        let alice = &game.players[0];
        assert_eq!(alice.gold, 6);
        assert_eq!(alice.hand.cards, vec![Card::new(CardName::Estate)]);
    }

    #[test]
    fn test_buy_ends_turn_when_out_of_buys() {
        let mut game = game();
        set_hand(&mut game, 0, &[CardName::Gold]);
        game.submit(Command::PlayAllTreasures).unwrap();

        // Gold costs 6
        game.submit(Command::BuyCard(2)).unwrap();
        assert_eq!(game.active_id(), PlayerId::new(0));

        game.submit(Command::BuyCard(1)).unwrap();
        assert_eq!(game.active_id(), PlayerId::new(1));
        assert_eq!(game.turn.turn_number, 2);
        assert!(game.players[0].discard.contains(&Card::new(CardName::Silver)));

        let lines: Vec<String> = game.drain_events().iter().map(|e| e.to_string()).collect();
        assert!(lines.contains(
            &"Private:Alice:Error:You cannot afford that card, try again!".to_string()
        ));
        assert!(lines.contains(&"Public:Alice bought a Silver.".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Turn:Bob"));
    }

    #[test]
    fn test_buy_rejects_empty_pile() {
        let mut game = game();
        game.supply.treasures[0].remove_all();

        game.submit(Command::BuyCard(0)).unwrap();
        game.submit(Command::BuyCard(99)).unwrap();

        assert_eq!(game.players[0].buys, 1);
        assert_eq!(game.drain_events().len(), 2);
    }

    #[test]
    fn test_protocol_violations() {
        let mut game = game();
        assert!(matches!(
            game.submit(Command::Payload("0".to_string())),
            Err(DominionError::NoPendingEffect)
        ));

        set_hand(&mut game, 0, &[CardName::ThroneRoom, CardName::Festival]);
        game.submit(Command::PlayCard(0)).unwrap();
        assert_eq!(game.phase(), TurnPhase::ResolvingEffect);
        assert!(matches!(
            game.submit(Command::EndTurn),
            Err(DominionError::EffectPending)
        ));

        // While resolving, raw tokens are payloads
        game.submit_token("0").unwrap();
        assert_eq!(game.phase(), TurnPhase::AwaitingCommand);
        assert_eq!(game.players[0].actions, 4);
    }

    #[test]
    fn test_failed_effect_start_restores_play() {
        let mut game = game();
        // Typed as an action, but Estate has no action effect
        let bogus = Card {
            card_type: CardType::Action,
            ..Card::new(CardName::Estate)
        };
        game.players[0].hand = Pile::from_cards(vec![Card::new(CardName::Copper), bogus]);
        let before = game.to_json().unwrap();

        assert!(matches!(
            game.submit(Command::PlayCard(1)),
            Err(DominionError::NotAnAction(_))
        ));

        assert_eq!(game.players[0].hand.cards[1], bogus);
        assert!(game.players[0].in_play.is_empty());
        assert_eq!(game.players[0].actions, 1);
        assert!(game.is_resolved());
        assert_eq!(game.phase(), TurnPhase::AwaitingCommand);
        assert!(game.drain_events().is_empty());
        assert_eq!(game.to_json().unwrap(), before);
    }

    #[test]
    fn test_last_province_ends_game() {
        let mut game = game();
        game.supply.victories[2] = Pile::from_cards(Card::copies(CardName::Province, 1));
        set_hand(&mut game, 0, &[CardName::Gold, CardName::Gold, CardName::Gold]);

        game.submit_token("PlayAllTreasures").unwrap();
        game.submit_token("BuyCard:5").unwrap();

        assert!(game.is_game_over());
        let events = game.drain_events();
        let end: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::EndGame(scores) => Some(scores),
                _ => None,
            })
            .collect();
        assert_eq!(end.len(), 1);
        assert_eq!(end[0].len(), 2);
        assert_eq!(end[0][0].provinces, 1);
        assert!(matches!(
            game.submit(Command::EndTurn),
            Err(DominionError::GameOver)
        ));
    }

    #[test]
    fn test_three_empty_piles_end_game() {
        let mut game = game();
        game.supply.kingdoms[0].remove_all();
        game.supply.kingdoms[1].remove_all();
        game.supply.curses.remove_all();

        game.submit(Command::EndTurn).unwrap();

        assert_eq!(game.phase(), TurnPhase::GameOver);
    }
}
