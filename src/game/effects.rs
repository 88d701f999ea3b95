//! Action-card effects
//!
//! [`GameState::advance`] runs one frame from its resume point until the
//! effect finishes, needs a payload, or nests another card's effect. Usage
//! errors in a payload are reported privately and the frame re-suspends at
//! the same point, untouched.

use crate::core::{Card, CardName, PlayerId};
use crate::game::events::NoticeKind;
use crate::game::resolver::{
    distinct_indices, parse_choice, parse_index, parse_indices, Frame, GainDestination, GainRule,
    ResumePoint, Step, CHAPEL_LIMIT, LIBRARY_HAND_SIZE, MILITIA_HAND_SIZE,
};
use crate::game::GameState;
use crate::zones::{Pile, PileKind};
use crate::{DominionError, Result};
use smallvec::SmallVec;

const CHOICE_ERROR: &str = "Choose 0 or 1, try again!";
const NOT_IN_HAND: &str = "That card is not in your hand, try again!";

fn yes_no() -> NoticeKind {
    NoticeKind::Decision {
        first: "Yes".to_string(),
        second: "No".to_string(),
    }
}

fn name_list(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The players of `order` that come after `after`
fn remaining(order: Vec<PlayerId>, after: Option<PlayerId>) -> Vec<PlayerId> {
    match after.and_then(|a| order.iter().position(|&p| p == a)) {
        Some(pos) => order[pos + 1..].to_vec(),
        None => order,
    }
}

impl GameState {
    /// Run `frame` from its resume point
    pub(crate) fn advance(&mut self, frame: &Frame, input: Option<&str>) -> Result<Step> {
        let actor = frame.player;
        self.seat(actor)?;
        let raw = match input {
            Some(raw) => raw,
            None if frame.resume.awaits_input() => {
                return Err(DominionError::MissingPayload(format!(
                    "{} at {:?}",
                    frame.card, frame.resume
                )));
            }
            None => "",
        };

        match &frame.resume {
            ResumePoint::Start => self.begin_effect(frame.card, actor),
            ResumePoint::CellarDiscard => self.cellar_discard(actor, raw),
            ResumePoint::ChapelTrash => self.chapel_trash(actor, raw),
            ResumePoint::ChancellorDecision => self.chancellor_decision(actor, raw),
            ResumePoint::Gain(rule) => self.resolve_gain(actor, rule, raw),
            ResumePoint::MilitiaDiscard { victim } => self.militia_discard(actor, *victim, raw),
            ResumePoint::RemodelTrash => self.remodel_trash(actor, raw),
            ResumePoint::MineTrash => self.mine_trash(actor, raw),
            ResumePoint::SpyDecision { target } => self.spy_decision(actor, *target, raw),
            ResumePoint::ThiefChooseTrash { victim, revealed } => {
                self.thief_choose(actor, *victim, revealed, raw)
            }
            ResumePoint::ThiefGain { victim, card } => self.thief_gain(actor, *victim, *card, raw),
            ResumePoint::ThroneRoomSelect => self.throne_room_select(actor, raw),
            ResumePoint::ThroneRoomReplay { card } => self.throne_room_replay(actor, *card),
            ResumePoint::ThroneRoomFinish => Ok(Step::Done),
            ResumePoint::LibrarySetAside { drawn, set_aside } => {
                self.library_decision(actor, *drawn, set_aside.clone(), raw)
            }
        }
    }

    fn begin_effect(&mut self, card: Card, actor: PlayerId) -> Result<Step> {
        let seat = self.seat(actor)?;
        if !Card::new(card.name).is_action() {
            return Err(DominionError::NotAnAction(card.to_string()));
        }
        let name = self.name_of(actor);
        self.announce(format!("{name} played a {card}."));

        match card.name {
            CardName::Cellar => {
                self.bump(seat, 1, 0, 0);
                if self.players[seat].hand.is_empty() {
                    self.announce(format!("{name} has no cards to discard."));
                    return Ok(Step::Done);
                }
                self.tell(actor, NoticeKind::Select, "Choose any number of cards to discard.");
                Ok(Step::Suspend(ResumePoint::CellarDiscard))
            }
            CardName::Chapel => {
                if self.players[seat].hand.is_empty() {
                    self.announce(format!("{name} has no cards to trash."));
                    return Ok(Step::Done);
                }
                self.tell(
                    actor,
                    NoticeKind::Select,
                    format!("Choose up to {CHAPEL_LIMIT} cards to trash."),
                );
                Ok(Step::Suspend(ResumePoint::ChapelTrash))
            }
            CardName::Moat => {
                self.draw_for(actor, 2)?;
                Ok(Step::Done)
            }
            CardName::Chancellor => {
                self.bump(seat, 0, 0, 2);
                self.tell(actor, yes_no(), "Place deck into discard pile?");
                Ok(Step::Suspend(ResumePoint::ChancellorDecision))
            }
            CardName::Village => {
                self.draw_for(actor, 1)?;
                self.bump(seat, 2, 0, 0);
                Ok(Step::Done)
            }
            CardName::Woodcutter => {
                self.bump(seat, 0, 1, 2);
                Ok(Step::Done)
            }
            CardName::Workshop => self.begin_gain(actor, GainRule::any(4)),
            CardName::Bureaucrat => self.bureaucrat(actor),
            CardName::Feast => {
                if let Some(feast) = self.players[seat].in_play.remove_last_matching(&card) {
                    self.trash.push(feast);
                    self.announce(format!("{name} trashed a {feast}."));
                }
                self.begin_gain(actor, GainRule::any(5))
            }
            CardName::Militia => {
                self.bump(seat, 0, 0, 2);
                self.militia_next(actor, None)
            }
            CardName::Moneylender => {
                let copper = Card::new(CardName::Copper);
                match self.players[seat].hand.iter().position(|c| *c == copper) {
                    Some(index) => {
                        let trashed = self.players[seat].hand.remove_at(index)?;
                        self.trash.push(trashed);
                        self.bump(seat, 0, 0, 3);
                        self.announce(format!("{name} trashed a Copper."));
                    }
                    None => self.announce(format!("{name} does not have a Copper to trash.")),
                }
                Ok(Step::Done)
            }
            CardName::Remodel => {
                if self.players[seat].hand.is_empty() {
                    self.announce(format!("{name}'s hand is empty."));
                    return Ok(Step::Done);
                }
                self.tell(actor, NoticeKind::Select, "Choose a card to trash.");
                Ok(Step::Suspend(ResumePoint::RemodelTrash))
            }
            CardName::Smithy => {
                self.draw_for(actor, 3)?;
                Ok(Step::Done)
            }
            CardName::Spy => {
                self.draw_for(actor, 1)?;
                self.bump(seat, 1, 0, 0);
                self.spy_next(actor, None)
            }
            CardName::Thief => self.thief_next(actor, None),
            CardName::ThroneRoom => {
                let hand = &self.players[seat].hand;
                if hand.is_empty() {
                    self.announce(format!("{name} has no cards in hand."));
                    return Ok(Step::Done);
                }
                if !hand.iter().any(|c| c.is_action()) {
                    self.announce(format!("{name} has no actions to choose from."));
                    return Ok(Step::Done);
                }
                self.tell(actor, NoticeKind::Select, "Choose an action card.");
                Ok(Step::Suspend(ResumePoint::ThroneRoomSelect))
            }
            CardName::CouncilRoom => {
                self.draw_for(actor, 4)?;
                self.bump(seat, 0, 1, 0);
                for other in self.opponents_of(actor) {
                    self.draw_for(other, 1)?;
                }
                Ok(Step::Done)
            }
            CardName::Festival => {
                self.bump(seat, 2, 1, 2);
                Ok(Step::Done)
            }
            CardName::Laboratory => {
                self.draw_for(actor, 2)?;
                self.bump(seat, 1, 0, 0);
                Ok(Step::Done)
            }
            CardName::Library => self.library_draw(actor, Vec::new()),
            CardName::Market => {
                self.draw_for(actor, 1)?;
                self.bump(seat, 1, 1, 1);
                Ok(Step::Done)
            }
            CardName::Mine => {
                let hand = &self.players[seat].hand;
                if hand.is_empty() {
                    self.announce(format!("{name}'s hand is empty."));
                    return Ok(Step::Done);
                }
                if !hand.iter().any(|c| c.is_treasure()) {
                    self.announce(format!("{name} has no treasures in hand."));
                    return Ok(Step::Done);
                }
                self.tell(actor, NoticeKind::Select, "Choose a treasure card to trash.");
                Ok(Step::Suspend(ResumePoint::MineTrash))
            }
            CardName::Witch => {
                self.draw_for(actor, 2)?;
                self.witch(actor);
                Ok(Step::Done)
            }
            CardName::Adventurer => {
                self.adventurer(actor)?;
                Ok(Step::Done)
            }
            CardName::Copper
            | CardName::Silver
            | CardName::Gold
            | CardName::Estate
            | CardName::Duchy
            | CardName::Province
            | CardName::Curse
            | CardName::Gardens => Err(DominionError::NotAnAction(card.to_string())),
        }
    }

    fn seat(&self, id: PlayerId) -> Result<usize> {
        if id.seat() < self.players.len() {
            Ok(id.seat())
        } else {
            Err(DominionError::OutOfRange {
                index: id.seat(),
                len: self.players.len(),
            })
        }
    }

    fn bump(&mut self, seat: usize, actions: u32, buys: u32, gold: u32) {
        let player = &mut self.players[seat];
        player.actions += actions;
        player.buys += buys;
        player.gold += gold;
    }

    fn draw_for(&mut self, id: PlayerId, count: usize) -> Result<usize> {
        self.with_player_rng(id, |player, rng| player.draw_many(count, rng))
    }

    /// Report a usage error and wait at the same point again
    fn retry(
        &mut self,
        who: PlayerId,
        text: impl Into<String>,
        resume: ResumePoint,
    ) -> Result<Step> {
        self.reject(who, text);
        Ok(Step::Suspend(resume))
    }

    /// Remove validated hand indices (highest first), returning the cards in
    /// hand order
    fn take_from_hand(&mut self, seat: usize, indices: &[usize]) -> Result<Vec<Card>> {
        let mut taken = indices
            .iter()
            .map(|&i| self.players[seat].hand.remove_at(i))
            .collect::<Result<Vec<_>>>()?;
        taken.reverse();
        Ok(taken)
    }

    /// Announce and skip an attack on a player holding a Moat
    fn blocked(&mut self, victim: PlayerId) -> bool {
        let has_moat = self
            .players
            .get(victim.seat())
            .is_some_and(|p| p.has_moat());
        if has_moat {
            let name = self.name_of(victim);
            self.announce(format!("{name} blocked the attack using Moat."));
        }
        has_moat
    }

    fn cellar_discard(&mut self, actor: PlayerId, raw: &str) -> Result<Step> {
        let seat = self.seat(actor)?;
        let Some(indices) = parse_indices(raw) else {
            return self.retry(
                actor,
                "Enter card positions separated by spaces, try again!",
                ResumePoint::CellarDiscard,
            );
        };
        let indices = match distinct_indices(indices, self.players[seat].hand.len()) {
            Ok(indices) => indices,
            Err(msg) => return self.retry(actor, msg, ResumePoint::CellarDiscard),
        };

        let name = self.name_of(actor);
        let discarded = self.take_from_hand(seat, &indices)?;
        if discarded.is_empty() {
            self.announce(format!("{name} discarded no cards."));
            return Ok(Step::Done);
        }
        self.announce(format!("{name} discarded {}.", name_list(&discarded)));
        let count = discarded.len();
        self.players[seat].discard.add(discarded);
        let drawn = self.draw_for(actor, count)?;
        self.announce(format!("{name} drew {drawn} cards."));
        Ok(Step::Done)
    }

    fn chapel_trash(&mut self, actor: PlayerId, raw: &str) -> Result<Step> {
        let seat = self.seat(actor)?;
        let Some(indices) = parse_indices(raw) else {
            return self.retry(
                actor,
                "Enter card positions separated by spaces, try again!",
                ResumePoint::ChapelTrash,
            );
        };
        if indices.len() > CHAPEL_LIMIT {
            return self.retry(
                actor,
                format!("You may trash at most {CHAPEL_LIMIT} cards, try again!"),
                ResumePoint::ChapelTrash,
            );
        }
        let indices = match distinct_indices(indices, self.players[seat].hand.len()) {
            Ok(indices) => indices,
            Err(msg) => return self.retry(actor, msg, ResumePoint::ChapelTrash),
        };

        let name = self.name_of(actor);
        let trashed = self.take_from_hand(seat, &indices)?;
        if trashed.is_empty() {
            self.announce(format!("{name} trashed no cards."));
        } else {
            self.announce(format!("{name} trashed {}.", name_list(&trashed)));
            self.trash.add(trashed);
        }
        Ok(Step::Done)
    }

    fn chancellor_decision(&mut self, actor: PlayerId, raw: &str) -> Result<Step> {
        let Some(discard_deck) = parse_choice(raw) else {
            return self.retry(actor, CHOICE_ERROR, ResumePoint::ChancellorDecision);
        };
        let name = self.name_of(actor);
        if discard_deck {
            self.player_mut(actor)?
                .transfer(PileKind::Deck, PileKind::Discard);
            self.announce(format!("{name} placed deck into discard pile."));
        } else {
            self.announce(format!("{name} did not place deck into discard pile."));
        }
        Ok(Step::Done)
    }

    /// Offer a gain from the supply, or skip when nothing qualifies
    fn begin_gain(&mut self, actor: PlayerId, rule: GainRule) -> Result<Step> {
        let gainable = self
            .supply
            .piles()
            .filter_map(Pile::peek_top)
            .any(|card| rule.admits(card));
        if !gainable {
            let name = self.name_of(actor);
            self.announce(format!("There is no card {name} can gain."));
            return Ok(Step::Done);
        }

        let text = match rule.destination {
            GainDestination::Discard => format!("Gain a card costing up to {}.", rule.budget),
            GainDestination::Hand => {
                format!("Gain a treasure card costing up to {}.", rule.budget)
            }
        };
        self.tell(actor, NoticeKind::Gain, text);
        Ok(Step::Suspend(ResumePoint::Gain(rule)))
    }

    fn resolve_gain(&mut self, actor: PlayerId, rule: &GainRule, raw: &str) -> Result<Step> {
        let seat = self.seat(actor)?;
        let again = || ResumePoint::Gain(rule.clone());

        let Some(index) = parse_index(raw) else {
            return self.retry(actor, "Choose a supply pile, try again!", again());
        };
        let top = match self.supply.slot(index) {
            Some(pile) => pile.peek_top().copied(),
            None => return self.retry(actor, "That is not a supply pile, try again!", again()),
        };
        let Some(top) = top else {
            return self.retry(actor, "That supply pile is empty, try again!", again());
        };
        if !rule.allowed.contains(&top.card_type) {
            return self.retry(actor, "You cannot gain a card of that type, try again!", again());
        }
        if u32::from(top.cost) > rule.budget {
            return self.retry(
                actor,
                format!("That card costs more than {}, try again!", rule.budget),
                again(),
            );
        }

        let slots = self.supply.slot_count();
        let card = self
            .supply
            .slot_mut(index)
            .and_then(|pile| pile.pop_top())
            .ok_or(DominionError::OutOfRange { index, len: slots })?;
        match rule.destination {
            GainDestination::Discard => self.players[seat].discard.push(card),
            GainDestination::Hand => self.players[seat].hand.push(card),
        }
        let name = self.name_of(actor);
        self.announce(format!("{name} gained a {card}."));
        Ok(Step::Done)
    }

    fn bureaucrat(&mut self, actor: PlayerId) -> Result<Step> {
        let seat = self.seat(actor)?;
        let name = self.name_of(actor);
        match self.supply.treasures[1].pop_top() {
            Some(silver) => {
                self.players[seat].deck.push(silver);
                self.announce(format!("{name} gained a Silver."));
            }
            None => self.announce("There are no more Silvers."),
        }

        for victim in self.opponents_of(actor) {
            if self.blocked(victim) {
                continue;
            }
            let other = &mut self.players[victim.seat()];
            let other_name = other.name.to_string();
            match other.hand.iter().position(|c| c.is_victory()) {
                Some(index) => {
                    let card = other.hand.remove_at(index)?;
                    other.deck.push(card);
                    self.announce(format!("{other_name} placed {card} on top of their deck."));
                }
                None => {
                    let hand = name_list(&other.hand.cards);
                    self.announce(format!("{other_name} revealed {hand}."));
                }
            }
        }
        Ok(Step::Done)
    }

    fn militia_next(&mut self, actor: PlayerId, after: Option<PlayerId>) -> Result<Step> {
        for victim in remaining(self.opponents_of(actor), after) {
            let victim_name = self.name_of(victim);
            if self.players[victim.seat()].hand.len() <= MILITIA_HAND_SIZE {
                self.announce(format!(
                    "{victim_name} has {MILITIA_HAND_SIZE} or fewer cards in hand."
                ));
                continue;
            }
            if self.blocked(victim) {
                continue;
            }
            self.tell(
                actor,
                NoticeKind::Waiting,
                format!("Waiting for {victim_name} to discard..."),
            );
            self.tell(
                victim,
                NoticeKind::Discard,
                format!("Discard down to {MILITIA_HAND_SIZE} cards."),
            );
            return Ok(Step::Suspend(ResumePoint::MilitiaDiscard { victim }));
        }

        if after.is_some() {
            self.tell(actor, NoticeKind::Resume, "Everyone has discarded.");
        }
        Ok(Step::Done)
    }

    fn militia_discard(&mut self, actor: PlayerId, victim: PlayerId, raw: &str) -> Result<Step> {
        let seat = self.seat(victim)?;
        let again = ResumePoint::MilitiaDiscard { victim };
        let hand_len = self.players[seat].hand.len();

        let Some(indices) = parse_indices(raw) else {
            return self.retry(
                victim,
                "Enter card positions separated by spaces, try again!",
                again,
            );
        };
        if indices.is_empty() && hand_len > MILITIA_HAND_SIZE {
            return self.retry(victim, "You must select cards to discard, try again!", again);
        }
        let indices = match distinct_indices(indices, hand_len) {
            Ok(indices) => indices,
            Err(msg) => return self.retry(victim, msg, again),
        };
        if hand_len - indices.len() != MILITIA_HAND_SIZE {
            return self.retry(
                victim,
                format!("You must discard down to {MILITIA_HAND_SIZE}, try again!"),
                again,
            );
        }

        let discarded = self.take_from_hand(seat, &indices)?;
        let victim_name = self.name_of(victim);
        self.announce(format!("{victim_name} discarded {}.", name_list(&discarded)));
        self.players[seat].discard.add(discarded);
        self.militia_next(actor, Some(victim))
    }

    fn remodel_trash(&mut self, actor: PlayerId, raw: &str) -> Result<Step> {
        let seat = self.seat(actor)?;
        let Some(index) = parse_index(raw) else {
            return self.retry(
                actor,
                "You must select a card to trash, try again!",
                ResumePoint::RemodelTrash,
            );
        };
        if index >= self.players[seat].hand.len() {
            return self.retry(actor, NOT_IN_HAND, ResumePoint::RemodelTrash);
        }

        let trashed = self.players[seat].hand.remove_at(index)?;
        self.trash.push(trashed);
        let name = self.name_of(actor);
        self.announce(format!("{name} trashed a {trashed}."));
        self.begin_gain(actor, GainRule::any(u32::from(trashed.cost) + 2))
    }

    fn mine_trash(&mut self, actor: PlayerId, raw: &str) -> Result<Step> {
        let seat = self.seat(actor)?;
        let Some(index) = parse_index(raw) else {
            return self.retry(
                actor,
                "You must choose a card to trash, try again!",
                ResumePoint::MineTrash,
            );
        };
        match self.players[seat].hand.get(index) {
            None => return self.retry(actor, NOT_IN_HAND, ResumePoint::MineTrash),
            Some(card) if !card.is_treasure() => {
                return self.retry(
                    actor,
                    "That is not a treasure card, try again!",
                    ResumePoint::MineTrash,
                )
            }
            Some(_) => {}
        }

        let trashed = self.players[seat].hand.remove_at(index)?;
        self.trash.push(trashed);
        let name = self.name_of(actor);
        self.announce(format!("{name} trashed a {trashed}."));
        self.begin_gain(actor, GainRule::treasure_to_hand(u32::from(trashed.cost) + 3))
    }

    /// Spy reveals for the actor first, then each opponent in turn
    fn spy_next(&mut self, actor: PlayerId, after: Option<PlayerId>) -> Result<Step> {
        let mut order = vec![actor];
        order.extend(self.opponents_of(actor));

        for target in remaining(order, after) {
            if target != actor && self.blocked(target) {
                continue;
            }
            let target_name = self.name_of(target);
            let Some(card) = self.with_player_rng(target, |p, rng| p.reveal_top(rng))? else {
                self.announce(format!("{target_name} cannot reveal a card."));
                continue;
            };
            self.announce(format!("{target_name} revealed a {card}."));
            let prompt = if target == actor {
                format!("Discard the revealed {card}?")
            } else {
                format!("Make {target_name} discard the revealed {card}?")
            };
            self.tell(actor, yes_no(), prompt);
            return Ok(Step::Suspend(ResumePoint::SpyDecision { target }));
        }
        Ok(Step::Done)
    }

    fn spy_decision(&mut self, actor: PlayerId, target: PlayerId, raw: &str) -> Result<Step> {
        let seat = self.seat(target)?;
        let Some(discard) = parse_choice(raw) else {
            return self.retry(actor, CHOICE_ERROR, ResumePoint::SpyDecision { target });
        };

        let target_name = self.name_of(target);
        if let Some(card) = self.players[seat].deck.peek_top().copied() {
            if discard {
                let player = &mut self.players[seat];
                player.deck.remove_top()?;
                player.discard.push(card);
                self.announce(format!("{target_name} discarded the {card}."));
            } else {
                self.announce(format!("{target_name} did not discard the {card}."));
            }
        }
        self.spy_next(actor, Some(target))
    }

    fn thief_next(&mut self, actor: PlayerId, after: Option<PlayerId>) -> Result<Step> {
        for victim in remaining(self.opponents_of(actor), after) {
            if self.blocked(victim) {
                continue;
            }
            let victim_name = self.name_of(victim);

            let mut revealed: SmallVec<[Card; 2]> = SmallVec::new();
            for _ in 0..2 {
                match self.with_player_rng(victim, |p, rng| p.take_from_deck(rng))? {
                    Some(card) => revealed.push(card),
                    None => break,
                }
            }
            if revealed.is_empty() {
                self.announce(format!("{victim_name} could not reveal any cards."));
                continue;
            }
            self.announce(format!("{victim_name} revealed {}.", name_list(&revealed)));

            let treasures = revealed.iter().filter(|c| c.is_treasure()).count();
            if treasures == 0 {
                self.announce(format!("{victim_name} had no treasures to reveal."));
                self.announce(format!("{victim_name} discarded {}.", name_list(&revealed)));
                self.players[victim.seat()].discard.add(revealed);
                continue;
            }
            if treasures == 1 {
                if let Some(pos) = revealed.iter().position(|c| c.is_treasure()) {
                    let card = revealed.remove(pos);
                    return self.thief_trash(actor, victim, card, revealed);
                }
            }

            let (first, second) = (revealed[0].to_string(), revealed[1].to_string());
            self.tell(
                actor,
                NoticeKind::Decision {
                    first: first.clone(),
                    second: second.clone(),
                },
                format!("Make {victim_name} trash the {first} or {second}?"),
            );
            return Ok(Step::Suspend(ResumePoint::ThiefChooseTrash { victim, revealed }));
        }
        Ok(Step::Done)
    }

    fn thief_choose(
        &mut self,
        actor: PlayerId,
        victim: PlayerId,
        revealed: &SmallVec<[Card; 2]>,
        raw: &str,
    ) -> Result<Step> {
        self.seat(victim)?;
        let Some(first) = parse_choice(raw) else {
            let again = ResumePoint::ThiefChooseTrash {
                victim,
                revealed: revealed.clone(),
            };
            return self.retry(actor, CHOICE_ERROR, again);
        };

        let index = if first { 0 } else { 1 };
        if index >= revealed.len() {
            return Err(DominionError::OutOfRange {
                index,
                len: revealed.len(),
            });
        }
        let mut rest = revealed.clone();
        let card = rest.remove(index);
        self.thief_trash(actor, victim, card, rest)
    }

    /// Trash the stolen treasure, discard the rest, and offer it to the thief
    fn thief_trash(
        &mut self,
        actor: PlayerId,
        victim: PlayerId,
        card: Card,
        rest: SmallVec<[Card; 2]>,
    ) -> Result<Step> {
        let seat = self.seat(victim)?;
        let victim_name = self.name_of(victim);
        self.trash.push(card);
        self.announce(format!("{victim_name} trashed the revealed {card}."));
        if !rest.is_empty() {
            self.announce(format!(
                "{victim_name} discarded the revealed {}.",
                name_list(&rest)
            ));
            self.players[seat].discard.add(rest);
        }

        self.tell(actor, yes_no(), format!("Gain the trashed {card}?"));
        Ok(Step::Suspend(ResumePoint::ThiefGain { victim, card }))
    }

    fn thief_gain(
        &mut self,
        actor: PlayerId,
        victim: PlayerId,
        card: Card,
        raw: &str,
    ) -> Result<Step> {
        let seat = self.seat(actor)?;
        let Some(gain) = parse_choice(raw) else {
            return self.retry(actor, CHOICE_ERROR, ResumePoint::ThiefGain { victim, card });
        };

        let name = self.name_of(actor);
        if gain {
            if let Some(gained) = self.trash.remove_last_matching(&card) {
                self.players[seat].discard.push(gained);
                self.announce(format!("{name} gained the trashed {gained}."));
            }
        } else {
            self.announce(format!("{name} did not gain the trashed {card}."));
        }
        self.thief_next(actor, Some(victim))
    }

    fn throne_room_select(&mut self, actor: PlayerId, raw: &str) -> Result<Step> {
        let seat = self.seat(actor)?;
        let Some(index) = parse_index(raw) else {
            return self.retry(
                actor,
                "You must select a card from your hand, try again!",
                ResumePoint::ThroneRoomSelect,
            );
        };
        match self.players[seat].hand.get(index) {
            None => return self.retry(actor, NOT_IN_HAND, ResumePoint::ThroneRoomSelect),
            Some(card) if !card.is_action() => {
                return self.retry(
                    actor,
                    "You must select an action card, try again!",
                    ResumePoint::ThroneRoomSelect,
                )
            }
            Some(_) => {}
        }

        let player = &mut self.players[seat];
        let card = player.hand.remove_at(index)?;
        player.in_play.push(card);
        Ok(Step::Nest {
            resume: ResumePoint::ThroneRoomReplay { card },
            child: Frame::new(card, actor),
        })
    }

    /// Second run of the doubled card. A Feast trashed itself on the first
    /// run, so it is brought back from the trash to be played again.
    fn throne_room_replay(&mut self, actor: PlayerId, card: Card) -> Result<Step> {
        let seat = self.seat(actor)?;
        if card.name == CardName::Feast {
            if let Some(feast) = self.trash.remove_last_matching(&card) {
                self.players[seat].in_play.push(feast);
            }
        }
        Ok(Step::Nest {
            resume: ResumePoint::ThroneRoomFinish,
            child: Frame::new(card, actor),
        })
    }

    fn library_draw(&mut self, actor: PlayerId, set_aside: Vec<Card>) -> Result<Step> {
        let seat = self.seat(actor)?;
        let name = self.name_of(actor);
        while self.players[seat].hand.len() < LIBRARY_HAND_SIZE {
            let Some(card) = self.with_player_rng(actor, |p, rng| p.take_from_deck(rng))? else {
                self.announce(format!("{name} cannot draw anymore cards."));
                break;
            };
            self.announce(format!("{name} drew a {card}."));
            if card.is_action() {
                self.tell(actor, yes_no(), format!("Set aside the {card}?"));
                return Ok(Step::Suspend(ResumePoint::LibrarySetAside {
                    drawn: card,
                    set_aside,
                }));
            }
            self.players[seat].hand.push(card);
        }
        self.players[seat].discard.add(set_aside);
        Ok(Step::Done)
    }

    fn library_decision(
        &mut self,
        actor: PlayerId,
        drawn: Card,
        mut set_aside: Vec<Card>,
        raw: &str,
    ) -> Result<Step> {
        let seat = self.seat(actor)?;
        let Some(skip) = parse_choice(raw) else {
            return self.retry(
                actor,
                CHOICE_ERROR,
                ResumePoint::LibrarySetAside { drawn, set_aside },
            );
        };

        let name = self.name_of(actor);
        if skip {
            set_aside.push(drawn);
            self.announce(format!("{name} set {drawn} aside."));
        } else {
            self.players[seat].hand.push(drawn);
            self.announce(format!("{name} did not set {drawn} aside."));
        }
        self.library_draw(actor, set_aside)
    }

    /// Each unblocked opponent gains a Curse until the pile runs out
    fn witch(&mut self, actor: PlayerId) {
        for victim in self.opponents_of(actor) {
            if self.blocked(victim) {
                continue;
            }
            match self.supply.curses.pop_top() {
                Some(curse) => {
                    self.players[victim.seat()].discard.push(curse);
                    let victim_name = self.name_of(victim);
                    self.announce(format!("{victim_name} gained a Curse."));
                }
                None => {
                    self.announce("There are no more Curses.");
                    break;
                }
            }
        }
    }

    /// Reveal until two treasures turn up; the rest are discarded afterwards
    fn adventurer(&mut self, actor: PlayerId) -> Result<()> {
        let seat = self.seat(actor)?;
        let name = self.name_of(actor);
        let mut revealed = Vec::new();
        let mut treasures = 0;
        while treasures < 2 {
            let Some(card) = self.with_player_rng(actor, |p, rng| p.take_from_deck(rng))? else {
                self.announce(format!("{name} cannot draw anymore cards."));
                break;
            };
            self.announce(format!("{name} revealed a {card}."));
            if card.is_treasure() {
                self.players[seat].hand.push(card);
                treasures += 1;
            } else {
                revealed.push(card);
            }
        }
        self.players[seat].discard.add(revealed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Command, GameConfig, TurnPhase, VerbosityLevel};

    const KINGDOM: [CardName; 10] = [
        CardName::Cellar,
        CardName::Chapel,
        CardName::Moat,
        CardName::Village,
        CardName::Workshop,
        CardName::Militia,
        CardName::Remodel,
        CardName::ThroneRoom,
        CardName::Library,
        CardName::Witch,
    ];

    fn game(players: &[&str]) -> GameState {
        let config = GameConfig::new()
            .with_seed(7)
            .with_kingdom(KINGDOM)
            .with_verbosity(VerbosityLevel::Silent);
        let mut game = GameState::with_config(players, &config).unwrap();
        game.drain_events();
        game
    }

    fn set_hand(game: &mut GameState, seat: usize, cards: &[CardName]) {
        let player = &mut game.players[seat];
        player.hand = Pile::from_cards(cards.iter().map(|&n| Card::new(n)).collect());
    }

    fn lines(game: &mut GameState) -> Vec<String> {
        game.drain_events().iter().map(|e| e.to_string()).collect()
    }

    fn hand_names(game: &GameState, seat: usize) -> Vec<CardName> {
        game.players[seat].hand.iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_village_draws_and_adds_actions() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Village, CardName::Copper]);

        game.submit(Command::PlayCard(0)).unwrap();

        let alice = &game.players[0];
        assert_eq!(alice.actions, 2);
        assert_eq!(alice.hand.len(), 2);
        assert_eq!(game.phase(), TurnPhase::AwaitingCommand);
        assert_eq!(lines(&mut game), vec!["Public:Alice played a Village."]);
    }

    #[test]
    fn test_cellar_discards_then_draws() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(
            &mut game,
            0,
            &[CardName::Cellar, CardName::Estate, CardName::Copper, CardName::Estate],
        );

        game.submit(Command::PlayCard(0)).unwrap();
        assert_eq!(game.phase(), TurnPhase::ResolvingEffect);

        game.submit(Command::Payload("0 2".to_string())).unwrap();

        let alice = &game.players[0];
        assert!(game.is_resolved());
        assert_eq!(alice.hand.len(), 3);
        assert_eq!(alice.discard.count_of(&Card::new(CardName::Estate)), 2);
        assert_eq!(alice.actions, 1);
        let log = lines(&mut game);
        assert!(log.contains(&"Public:Alice discarded Estate, Estate.".to_string()));
        assert!(log.contains(&"Public:Alice drew 2 cards.".to_string()));
    }

    #[test]
    fn test_chapel_rejects_too_many_and_repeats() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(
            &mut game,
            0,
            &[
                CardName::Chapel,
                CardName::Copper,
                CardName::Copper,
                CardName::Estate,
                CardName::Estate,
                CardName::Estate,
            ],
        );
        game.submit(Command::PlayCard(0)).unwrap();
        game.drain_events();

        game.submit(Command::Payload("0 1 2 3 4".to_string())).unwrap();
        assert!(game.drain_events().iter().any(|e| e.is_error()));
        game.submit(Command::Payload("1 1".to_string())).unwrap();
        assert!(game.drain_events().iter().any(|e| e.is_error()));
        assert_eq!(game.players[0].hand.len(), 5);

        game.submit(Command::Payload("2 3 4".to_string())).unwrap();
        assert!(game.is_resolved());
        assert_eq!(hand_names(&game, 0), vec![CardName::Copper, CardName::Copper]);
        assert_eq!(game.trash.count_of(&Card::new(CardName::Estate)), 3);
    }

    #[test]
    fn test_workshop_gain_validation() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Workshop]);
        game.submit(Command::PlayCard(0)).unwrap();

        // Gold costs 6, curses are not gainable, slot 40 does not exist
        for bad in ["2", "16", "40", "x"] {
            game.drain_events();
            game.submit(Command::Payload(bad.to_string())).unwrap();
            assert!(!game.is_resolved(), "payload {bad} should be rejected");
            assert!(game.drain_events().iter().any(|e| e.is_error()));
        }

        game.submit(Command::Payload("1".to_string())).unwrap();
        assert!(game.is_resolved());
        assert_eq!(
            game.players[0].discard.peek_top(),
            Some(&Card::new(CardName::Silver))
        );
        assert_eq!(game.supply.treasures[1].len(), 39);
    }

    #[test]
    fn test_militia_waits_for_each_victim() {
        let mut game = game(&["Alice", "Bob", "Carol"]);
        set_hand(&mut game, 0, &[CardName::Militia]);
        game.submit(Command::PlayCard(0)).unwrap();
        assert_eq!(game.players[0].gold, 2);

        let pending = game.pending_decision().unwrap();
        assert_eq!(pending.player, PlayerId::new(1));

        // Bob must end at exactly three cards
        game.submit(Command::Payload("0".to_string())).unwrap();
        assert_eq!(game.players[1].hand.len(), 5);
        game.submit(Command::Payload("0 1".to_string())).unwrap();
        assert_eq!(game.players[1].hand.len(), 3);

        assert_eq!(game.pending_decision().unwrap().player, PlayerId::new(2));
        game.submit(Command::Payload("4 3".to_string())).unwrap();
        assert_eq!(game.players[2].hand.len(), 3);
        assert!(game.is_resolved());

        let log = lines(&mut game);
        assert!(log.contains(&"Private:Alice:Suspend:Waiting for Bob to discard...".to_string()));
        assert!(log.contains(&"Private:Carol:Discard:Discard down to 3 cards.".to_string()));
        assert_eq!(
            log.last().map(String::as_str),
            Some("Private:Alice:Resume:Everyone has discarded.")
        );
    }

    #[test]
    fn test_moat_blocks_attack() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Militia]);
        set_hand(
            &mut game,
            1,
            &[
                CardName::Moat,
                CardName::Copper,
                CardName::Copper,
                CardName::Estate,
                CardName::Estate,
            ],
        );

        game.submit(Command::PlayCard(0)).unwrap();

        assert!(game.is_resolved());
        assert_eq!(game.players[1].hand.len(), 5);
        assert!(lines(&mut game)
            .contains(&"Public:Bob blocked the attack using Moat.".to_string()));
    }

    #[test]
    fn test_witch_with_curses_exhausted() {
        let mut game = game(&["Alice", "Bob", "Carol"]);
        set_hand(&mut game, 0, &[CardName::Witch]);
        game.supply.curses.remove_all();
        let before = game.card_census();

        game.submit(Command::PlayCard(0)).unwrap();

        assert!(game.is_resolved());
        assert_eq!(game.players[0].hand.len(), 2);
        assert_eq!(game.card_census(), before);
        let events = game.drain_events();
        assert!(!events.iter().any(|e| e.is_error()));
        assert!(events
            .iter()
            .any(|e| e.to_string() == "Public:There are no more Curses."));
    }

    #[test]
    fn test_witch_curses_in_seating_order() {
        let mut game = game(&["Alice", "Bob", "Carol"]);
        set_hand(&mut game, 1, &[CardName::Witch]);
        game.turn.active_player = PlayerId::new(1);
        game.players[1].start_turn();
        game.supply.curses = Pile::from_cards(Card::copies(CardName::Curse, 1));

        game.submit(Command::PlayCard(0)).unwrap();

        let curse = Card::new(CardName::Curse);
        assert_eq!(game.players[2].discard.count_of(&curse), 1);
        assert_eq!(game.players[0].discard.count_of(&curse), 0);
    }

    #[test]
    fn test_throne_room_feast_plays_twice() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::ThroneRoom, CardName::Feast]);

        game.submit(Command::PlayCard(0)).unwrap();
        game.submit(Command::Payload("0".to_string())).unwrap();
        // Village costs 3, slot 9
        game.submit(Command::Payload("9".to_string())).unwrap();
        assert!(!game.is_resolved());
        game.submit(Command::Payload("9".to_string())).unwrap();

        assert!(game.is_resolved());
        let alice = &game.players[0];
        assert_eq!(alice.discard.count_of(&Card::new(CardName::Village)), 2);
        assert_eq!(game.trash.count_of(&Card::new(CardName::Feast)), 1);
        let log = lines(&mut game);
        let feasts = log.iter().filter(|l| *l == "Public:Alice played a Feast.").count();
        assert_eq!(feasts, 2);
    }

    #[test]
    fn test_throne_room_requires_action() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::ThroneRoom, CardName::Copper, CardName::Smithy]);
        game.players[0].deck.add(Card::copies(CardName::Copper, 3));
        game.submit(Command::PlayCard(0)).unwrap();

        game.submit(Command::Payload("0".to_string())).unwrap();
        assert_eq!(game.resolver.depth(), 1);

        game.submit(Command::Payload("1".to_string())).unwrap();
        assert!(game.is_resolved());
        // Copper plus 3 + 3 draws
        assert_eq!(game.players[0].hand.len(), 7);
    }

    #[test]
    fn test_library_set_aside() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Library, CardName::Copper]);
        let alice = &mut game.players[0];
        alice.discard.remove_all();
        alice.deck = Pile::from_cards(vec![
            Card::new(CardName::Copper),
            Card::new(CardName::Copper),
            Card::new(CardName::Copper),
            Card::new(CardName::Copper),
            Card::new(CardName::Copper),
            Card::new(CardName::Smithy),
        ]);
        let before = game.card_census();

        game.submit(Command::PlayCard(0)).unwrap();
        assert_eq!(game.card_census(), before);
        game.submit(Command::Payload("0".to_string())).unwrap();

        assert!(game.is_resolved());
        let alice = &game.players[0];
        assert_eq!(alice.hand.len(), 6);
        assert_eq!(alice.discard.cards, vec![Card::new(CardName::Smithy)]);
        assert_eq!(game.card_census(), before);
    }

    #[test]
    fn test_remodel_budget() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Remodel, CardName::Estate]);
        game.submit(Command::PlayCard(0)).unwrap();
        game.submit(Command::Payload("0".to_string())).unwrap();

        let pending = game.pending_decision().unwrap();
        assert_eq!(pending.kind, crate::game::DecisionKind::Gain(GainRule::any(4)));
        // Duchy costs 5
        game.submit(Command::Payload("4".to_string())).unwrap();
        assert!(!game.is_resolved());
        game.submit(Command::Payload("1".to_string())).unwrap();
        assert!(game.is_resolved());
        assert_eq!(game.trash.cards, vec![Card::new(CardName::Estate)]);
    }

    #[test]
    fn test_thief_steals_single_treasure() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::ThroneRoom, CardName::Moat]);
        let bob = &mut game.players[1];
        bob.deck = Pile::from_cards(vec![Card::new(CardName::Gold), Card::new(CardName::Estate)]);
        let before = game.card_census();

        game.start_effect(Card::new(CardName::Thief), PlayerId::new(0)).unwrap();
        assert_eq!(game.trash.cards, vec![Card::new(CardName::Gold)]);
        assert_eq!(game.players[1].discard.peek_top(), Some(&Card::new(CardName::Estate)));
        assert_eq!(game.card_census().len(), before.len());

        game.resume_effect("0").unwrap();
        assert!(game.is_resolved());
        assert!(game.trash.is_empty());
        assert_eq!(game.players[0].discard.peek_top(), Some(&Card::new(CardName::Gold)));
    }

    /// Replace a player's deck (bottom first) and empty their discard pile
    fn set_deck(game: &mut GameState, seat: usize, cards: &[CardName]) {
        let player = &mut game.players[seat];
        player.deck = Pile::from_cards(cards.iter().map(|&n| Card::new(n)).collect());
        player.discard.remove_all();
    }

    #[test]
    fn test_moat_played_as_action() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Moat]);

        game.submit(Command::PlayCard(0)).unwrap();

        assert!(game.is_resolved());
        assert_eq!(game.players[0].hand.len(), 2);
        assert_eq!(game.players[0].actions, 0);
    }

    #[test]
    fn test_woodcutter_market_laboratory_counters() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(
            &mut game,
            0,
            &[
                CardName::Village,
                CardName::Woodcutter,
                CardName::Market,
                CardName::Laboratory,
            ],
        );
        set_deck(&mut game, 0, &[CardName::Copper; 5]);

        game.submit(Command::PlayCard(0)).unwrap();
        game.submit(Command::PlayCard(0)).unwrap();
        let alice = &game.players[0];
        assert_eq!((alice.actions, alice.buys, alice.gold), (1, 2, 2));

        game.submit(Command::PlayCard(0)).unwrap();
        let alice = &game.players[0];
        assert_eq!((alice.actions, alice.buys, alice.gold), (1, 3, 3));
        assert_eq!(alice.hand.len(), 3);

        game.submit(Command::PlayCard(0)).unwrap();
        let alice = &game.players[0];
        assert_eq!((alice.actions, alice.buys, alice.gold), (1, 3, 3));
        assert_eq!(hand_names(&game, 0), vec![CardName::Copper; 4]);
        assert_eq!(game.players[0].deck.len(), 1);
    }

    #[test]
    fn test_council_room_opponents_draw_one() {
        let mut game = game(&["Alice", "Bob", "Carol"]);
        set_hand(&mut game, 0, &[CardName::CouncilRoom]);

        game.submit(Command::PlayCard(0)).unwrap();

        assert!(game.is_resolved());
        assert_eq!(game.players[0].hand.len(), 4);
        assert_eq!(game.players[0].buys, 2);
        assert_eq!(game.players[1].hand.len(), 6);
        assert_eq!(game.players[2].hand.len(), 6);
    }

    #[test]
    fn test_chancellor_both_choices() {
        {
            let mut game = game(&["Alice", "Bob"]);
            set_hand(&mut game, 0, &[CardName::Chancellor]);
            game.submit(Command::PlayCard(0)).unwrap();
            assert_eq!(game.players[0].gold, 2);

            game.submit(Command::Payload("2".to_string())).unwrap();
            assert!(!game.is_resolved());
            game.submit(Command::Payload("0".to_string())).unwrap();
            assert!(game.is_resolved());
            assert!(game.players[0].deck.is_empty());
            assert_eq!(game.players[0].discard.len(), 5);
        }

        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Chancellor]);
        game.submit(Command::PlayCard(0)).unwrap();
        game.drain_events();
        game.submit(Command::Payload("1".to_string())).unwrap();
        assert!(game.is_resolved());
        assert_eq!(game.players[0].deck.len(), 5);
        assert!(game.players[0].discard.is_empty());
        assert!(lines(&mut game)
            .contains(&"Public:Alice did not place deck into discard pile.".to_string()));
    }

    #[test]
    fn test_moneylender_with_and_without_copper() {
        {
            let mut game = game(&["Alice", "Bob"]);
            set_hand(&mut game, 0, &[CardName::Moneylender, CardName::Estate, CardName::Copper]);
            game.submit(Command::PlayCard(0)).unwrap();

            assert_eq!(game.players[0].gold, 3);
            assert_eq!(hand_names(&game, 0), vec![CardName::Estate]);
            assert_eq!(game.trash.cards, vec![Card::new(CardName::Copper)]);
        }

        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Moneylender, CardName::Estate]);
        game.submit(Command::PlayCard(0)).unwrap();

        assert_eq!(game.players[0].gold, 0);
        assert!(game.trash.is_empty());
        assert!(lines(&mut game)
            .contains(&"Public:Alice does not have a Copper to trash.".to_string()));
    }

    #[test]
    fn test_mine_gains_treasure_into_hand() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Mine, CardName::Estate, CardName::Copper]);
        game.submit(Command::PlayCard(0)).unwrap();

        // Estate is not a treasure
        game.submit(Command::Payload("0".to_string())).unwrap();
        assert_eq!(game.players[0].hand.len(), 2);
        game.submit(Command::Payload("1".to_string())).unwrap();
        assert_eq!(
            game.pending_decision().unwrap().kind,
            crate::game::DecisionKind::Gain(GainRule::treasure_to_hand(3))
        );
        game.drain_events();

        // Gold costs 6, Estate is not a treasure
        for bad in ["2", "3"] {
            game.submit(Command::Payload(bad.to_string())).unwrap();
            assert!(!game.is_resolved());
            assert!(game.drain_events().iter().any(|e| e.is_error()));
        }

        game.submit(Command::Payload("1".to_string())).unwrap();
        assert!(game.is_resolved());
        assert_eq!(hand_names(&game, 0), vec![CardName::Estate, CardName::Silver]);
        assert_eq!(game.trash.cards, vec![Card::new(CardName::Copper)]);
        assert!(game.players[0].discard.is_empty());
    }

    #[test]
    fn test_bureaucrat_tops_decks() {
        let mut game = game(&["Alice", "Bob", "Carol"]);
        set_hand(&mut game, 0, &[CardName::Bureaucrat]);
        set_hand(&mut game, 1, &[CardName::Copper, CardName::Duchy, CardName::Copper]);
        set_hand(&mut game, 2, &[CardName::Moat, CardName::Estate]);
        let silvers = game.supply.treasures[1].len();

        game.submit(Command::PlayCard(0)).unwrap();

        assert!(game.is_resolved());
        assert_eq!(game.players[0].deck.peek_top(), Some(&Card::new(CardName::Silver)));
        assert_eq!(game.supply.treasures[1].len(), silvers - 1);
        assert_eq!(game.players[1].deck.peek_top(), Some(&Card::new(CardName::Duchy)));
        assert_eq!(hand_names(&game, 1), vec![CardName::Copper, CardName::Copper]);
        assert_eq!(hand_names(&game, 2), vec![CardName::Moat, CardName::Estate]);
        assert!(lines(&mut game)
            .contains(&"Public:Carol blocked the attack using Moat.".to_string()));
    }

    #[test]
    fn test_spy_asks_about_self_then_each_opponent() {
        let mut game = game(&["Alice", "Bob", "Carol"]);
        set_hand(&mut game, 0, &[CardName::Spy]);
        // Spy draws the Gold, then reveals the Silver
        set_deck(&mut game, 0, &[CardName::Silver, CardName::Gold]);
        set_deck(&mut game, 1, &[CardName::Copper, CardName::Estate]);
        set_deck(&mut game, 2, &[CardName::Copper, CardName::Province]);
        let before = game.card_census();

        game.submit(Command::PlayCard(0)).unwrap();
        assert_eq!(game.players[0].actions, 1);
        assert_eq!(hand_names(&game, 0), vec![CardName::Gold]);

        for (answer, target) in [("0", 0), ("1", 1), ("0", 2)] {
            let pending = game.pending_decision().unwrap();
            assert_eq!(pending.player, PlayerId::new(0));
            assert_eq!(
                pending.kind,
                crate::game::DecisionKind::Binary,
                "decision about seat {target}"
            );
            game.submit(Command::Payload(answer.to_string())).unwrap();
        }

        assert!(game.is_resolved());
        assert_eq!(game.players[0].discard.cards, vec![Card::new(CardName::Silver)]);
        assert_eq!(game.players[1].deck.peek_top(), Some(&Card::new(CardName::Estate)));
        assert_eq!(game.players[2].discard.cards, vec![Card::new(CardName::Province)]);
        assert_eq!(game.card_census(), before);

        let log = lines(&mut game);
        assert!(log.contains(&"Public:Bob did not discard the Estate.".to_string()));
        assert!(log.contains(&"Public:Carol discarded the Province.".to_string()));
    }

    #[test]
    fn test_thief_chooses_between_two_treasures() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Thief]);
        set_deck(&mut game, 1, &[CardName::Estate, CardName::Silver, CardName::Gold]);

        game.submit(Command::PlayCard(0)).unwrap();
        let log = lines(&mut game);
        assert!(log.contains(
            &"Private:Alice:Decision:Make Bob trash the Gold or Silver?:Gold:Silver".to_string()
        ));

        game.submit(Command::Payload("1".to_string())).unwrap();
        assert_eq!(game.trash.cards, vec![Card::new(CardName::Silver)]);
        assert_eq!(game.players[1].discard.cards, vec![Card::new(CardName::Gold)]);

        game.submit(Command::Payload("0".to_string())).unwrap();
        assert!(game.is_resolved());
        assert!(game.trash.is_empty());
        assert_eq!(game.players[0].discard.cards, vec![Card::new(CardName::Silver)]);
        assert_eq!(hand_names(&game, 1).len(), 5);
        assert_eq!(game.players[1].deck.cards, vec![Card::new(CardName::Estate)]);
    }

    #[test]
    fn test_thief_discards_when_no_treasure() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Thief]);
        set_deck(&mut game, 1, &[CardName::Copper, CardName::Estate, CardName::Estate]);

        game.submit(Command::PlayCard(0)).unwrap();

        assert!(game.is_resolved());
        assert!(game.trash.is_empty());
        assert_eq!(game.players[1].discard.cards, Card::copies(CardName::Estate, 2));
        assert_eq!(game.players[1].deck.cards, vec![Card::new(CardName::Copper)]);
        assert!(lines(&mut game).contains(&"Public:Bob had no treasures to reveal.".to_string()));
    }

    #[test]
    fn test_adventurer_stops_at_two_treasures() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Adventurer]);
        set_deck(
            &mut game,
            0,
            &[CardName::Copper, CardName::Estate, CardName::Silver, CardName::Smithy],
        );

        game.submit(Command::PlayCard(0)).unwrap();

        assert!(game.is_resolved());
        assert_eq!(hand_names(&game, 0), vec![CardName::Silver, CardName::Copper]);
        assert_eq!(
            game.players[0].discard.cards,
            vec![Card::new(CardName::Smithy), Card::new(CardName::Estate)]
        );
        assert!(game.players[0].deck.is_empty());
    }

    #[test]
    fn test_adventurer_runs_out_of_cards() {
        let mut game = game(&["Alice", "Bob"]);
        set_hand(&mut game, 0, &[CardName::Adventurer]);
        set_deck(&mut game, 0, &[CardName::Estate, CardName::Gold]);

        game.submit(Command::PlayCard(0)).unwrap();

        assert!(game.is_resolved());
        assert_eq!(hand_names(&game, 0), vec![CardName::Gold]);
        assert_eq!(game.players[0].discard.cards, vec![Card::new(CardName::Estate)]);
        assert!(lines(&mut game).contains(&"Public:Alice cannot draw anymore cards.".to_string()));
    }

    #[test]
    fn test_missing_payload_is_structural() {
        let mut game = game(&["Alice", "Bob"]);
        let frame = Frame {
            card: Card::new(CardName::Chancellor),
            player: PlayerId::new(0),
            resume: ResumePoint::ChancellorDecision,
        };
        assert!(matches!(
            game.advance(&frame, None),
            Err(DominionError::MissingPayload(_))
        ));
    }

    #[test]
    fn test_remaining_after() {
        let order = vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(0)];
        assert_eq!(remaining(order.clone(), None), order);
        assert_eq!(
            remaining(order, Some(PlayerId::new(2))),
            vec![PlayerId::new(0)]
        );
    }
}
