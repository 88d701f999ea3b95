//! Action-card effect resolver
//!
//! An effect is an explicit [`Frame`]: which card, who played it, and a
//! [`ResumePoint`] naming where it continues plus whatever it had
//! accumulated. Frames live on a stack. Only the top frame ever receives the
//! next payload. When it completes, the frame beneath continues from its own
//! resume point with no input. Nested plays (Throne Room) push a child frame
//! instead of recursing, so a suspended tower of any depth serializes like
//! the rest of the game state.

use crate::core::{Card, CardName, CardType, PlayerId};
use crate::game::GameState;
use crate::{DominionError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Where a gained card goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainDestination {
    Discard,
    Hand,
}

/// Constraints on a gain from the supply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GainRule {
    /// Highest cost that may be gained
    pub budget: u32,
    pub allowed: SmallVec<[CardType; 3]>,
    pub destination: GainDestination,
}

impl GainRule {
    /// Any Treasure, Victory or Action card up to `budget`, into discard
    pub fn any(budget: u32) -> Self {
        GainRule {
            budget,
            allowed: SmallVec::from_slice(&[
                CardType::Treasure,
                CardType::Victory,
                CardType::Action,
            ]),
            destination: GainDestination::Discard,
        }
    }

    /// A Treasure up to `budget`, straight into hand
    pub fn treasure_to_hand(budget: u32) -> Self {
        GainRule {
            budget,
            allowed: SmallVec::from_slice(&[CardType::Treasure]),
            destination: GainDestination::Hand,
        }
    }

    pub fn admits(&self, card: &Card) -> bool {
        self.allowed.contains(&card.card_type) && u32::from(card.cost) <= self.budget
    }
}

/// The point an effect resumes from, with the data it carries across the
/// suspension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumePoint {
    /// Not started yet
    Start,
    /// Cellar: hand indices to discard (possibly none)
    CellarDiscard,
    /// Chapel: up to four hand indices to trash
    ChapelTrash,
    /// Chancellor: put the deck into the discard pile?
    ChancellorDecision,
    /// Workshop, Feast, Remodel and Mine: a supply slot to gain from
    Gain(GainRule),
    /// Militia: `victim` must discard down to three
    MilitiaDiscard { victim: PlayerId },
    /// Remodel: hand index to trash
    RemodelTrash,
    /// Mine: hand index of a treasure to trash
    MineTrash,
    /// Spy: discard the card revealed from `target`'s deck?
    SpyDecision { target: PlayerId },
    /// Thief: which of two revealed treasures `victim` trashes
    ThiefChooseTrash {
        victim: PlayerId,
        revealed: SmallVec<[Card; 2]>,
    },
    /// Thief: gain the card just trashed from `victim`?
    ThiefGain { victim: PlayerId, card: Card },
    /// Throne Room: hand index of an action card
    ThroneRoomSelect,
    /// Throne Room: first nested play finished, run `card` again
    ThroneRoomReplay { card: Card },
    /// Throne Room: second nested play finished
    ThroneRoomFinish,
    /// Library: keep or set aside the drawn action card
    LibrarySetAside { drawn: Card, set_aside: Vec<Card> },
}

impl ResumePoint {
    /// Continuation points are reached when a child frame completes; every
    /// other point past `Start` waits for a payload.
    pub fn awaits_input(&self) -> bool {
        !matches!(
            self,
            ResumePoint::Start
                | ResumePoint::ThroneRoomReplay { .. }
                | ResumePoint::ThroneRoomFinish
        )
    }
}

/// One in-progress action-card effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Card whose effect this is
    pub card: Card,
    /// Player who played it
    pub player: PlayerId,
    pub resume: ResumePoint,
}

impl Frame {
    pub fn new(card: Card, player: PlayerId) -> Self {
        Frame {
            card,
            player,
            resume: ResumePoint::Start,
        }
    }

    /// Cards this frame holds outside of any pile while suspended
    pub fn held_cards(&self) -> impl Iterator<Item = &Card> {
        let held: &[Card] = match &self.resume {
            ResumePoint::LibrarySetAside { set_aside, .. } => set_aside.as_slice(),
            ResumePoint::ThiefChooseTrash { revealed, .. } => revealed.as_slice(),
            _ => &[],
        };
        let drawn = match &self.resume {
            ResumePoint::LibrarySetAside { drawn, .. } => Some(drawn),
            _ => None,
        };
        held.iter().chain(drawn)
    }
}

/// Result of advancing the top frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// The effect is finished; pop it
    Done,
    /// Wait for a payload at this point
    Suspend(ResumePoint),
    /// Run `child` first, then continue this frame at `resume`
    Nest { resume: ResumePoint, child: Frame },
}

/// The stack of suspended effect frames; empty when nothing is pending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resolver {
    frames: Vec<Frame>,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver { frames: Vec::new() }
    }

    /// True only when no effect is pending anywhere in the stack
    pub fn is_resolved(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The frame that will receive the next payload
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Cards held by suspended frames
    pub fn held_cards(&self) -> impl Iterator<Item = &Card> {
        self.frames.iter().flat_map(Frame::held_cards)
    }
}

/// Shape of the payload the top frame is waiting for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    /// Any number of distinct hand indices, space separated
    DiscardAny,
    /// At most this many distinct hand indices
    TrashUpTo(usize),
    /// Exactly enough hand indices to leave this many cards
    DiscardDownTo(usize),
    /// One hand index, optionally restricted to a card type
    HandIndex(Option<CardType>),
    /// One supply slot satisfying the rule
    Gain(GainRule),
    /// "0" for the first option, "1" for the second
    Binary,
}

/// What the engine is waiting for, and from whom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    /// The player who must answer
    pub player: PlayerId,
    /// The card whose effect is asking
    pub card: CardName,
    pub kind: DecisionKind,
}

impl PendingDecision {
    pub fn for_frame(frame: &Frame) -> Option<Self> {
        let mut player = frame.player;
        let kind = match &frame.resume {
            ResumePoint::CellarDiscard => DecisionKind::DiscardAny,
            ResumePoint::ChapelTrash => DecisionKind::TrashUpTo(CHAPEL_LIMIT),
            ResumePoint::MilitiaDiscard { victim } => {
                player = *victim;
                DecisionKind::DiscardDownTo(MILITIA_HAND_SIZE)
            }
            ResumePoint::RemodelTrash => DecisionKind::HandIndex(None),
            ResumePoint::MineTrash => DecisionKind::HandIndex(Some(CardType::Treasure)),
            ResumePoint::ThroneRoomSelect => DecisionKind::HandIndex(Some(CardType::Action)),
            ResumePoint::Gain(rule) => DecisionKind::Gain(rule.clone()),
            ResumePoint::ChancellorDecision
            | ResumePoint::SpyDecision { .. }
            | ResumePoint::ThiefChooseTrash { .. }
            | ResumePoint::ThiefGain { .. }
            | ResumePoint::LibrarySetAside { .. } => DecisionKind::Binary,
            ResumePoint::Start
            | ResumePoint::ThroneRoomReplay { .. }
            | ResumePoint::ThroneRoomFinish => return None,
        };
        Some(PendingDecision {
            player,
            card: frame.card.name,
            kind,
        })
    }
}

/// Chapel trashes at most this many cards
pub const CHAPEL_LIMIT: usize = 4;

/// Militia victims discard down to this many cards
pub const MILITIA_HAND_SIZE: usize = 3;

/// Library draws until the hand holds this many cards
pub const LIBRARY_HAND_SIZE: usize = 7;

/// Space-separated indices; an empty payload is an empty list
pub(crate) fn parse_indices(raw: &str) -> Option<Vec<usize>> {
    raw.split_whitespace().map(|tok| tok.parse().ok()).collect()
}

/// The first index of the payload
pub(crate) fn parse_index(raw: &str) -> Option<usize> {
    raw.split_whitespace().next()?.parse().ok()
}

/// "0" picks the first option, "1" the second
pub(crate) fn parse_choice(raw: &str) -> Option<bool> {
    match raw.trim() {
        "0" => Some(true),
        "1" => Some(false),
        _ => None,
    }
}

/// Validate a list of hand indices: all in range, no repeats. Returned
/// highest first so removals don't shift the ones still to come.
pub(crate) fn distinct_indices(
    mut indices: Vec<usize>,
    hand_len: usize,
) -> std::result::Result<Vec<usize>, &'static str> {
    if indices.iter().any(|&i| i >= hand_len) {
        return Err("That card is not in your hand, try again!");
    }
    indices.sort_unstable_by(|a, b| b.cmp(a));
    let before = indices.len();
    indices.dedup();
    if indices.len() != before {
        return Err("You selected the same card twice, try again!");
    }
    Ok(indices)
}

impl GameState {
    /// Start the effect of `card`, just played by `player`
    pub(crate) fn start_effect(&mut self, card: Card, player: PlayerId) -> Result<()> {
        self.logger
            .verbose(&format!("resolver: start {} for {}", card, player));
        self.resolver.push(Frame::new(card, player));
        self.drive_resolver(None)
    }

    /// Deliver a payload to the top frame
    pub(crate) fn resume_effect(&mut self, payload: &str) -> Result<()> {
        if self.resolver.is_resolved() {
            return Err(DominionError::NoPendingEffect);
        }
        self.drive_resolver(Some(payload))
    }

    /// Advance frames until one suspends or the stack empties
    fn drive_resolver(&mut self, mut input: Option<&str>) -> Result<()> {
        while let Some(frame) = self.resolver.pop() {
            let step = match self.advance(&frame, input.take()) {
                Ok(step) => step,
                Err(err) => {
                    self.resolver.push(frame);
                    return Err(err);
                }
            };

            match step {
                Step::Done => {
                    self.logger.verbose(&format!(
                        "resolver: {} complete (depth {})",
                        frame.card,
                        self.resolver.depth()
                    ));
                }
                Step::Suspend(resume) => {
                    self.logger
                        .verbose(&format!("resolver: {} suspended at {:?}", frame.card, resume));
                    self.resolver.push(Frame { resume, ..frame });
                    return Ok(());
                }
                Step::Nest { resume, child } => {
                    self.logger
                        .verbose(&format!("resolver: {} nests {}", frame.card, child.card));
                    self.resolver.push(Frame { resume, ..frame });
                    self.resolver.push(child);
                }
            }
        }
        Ok(())
    }

    /// Pending decision of the top frame, if any
    pub fn pending_decision(&self) -> Option<PendingDecision> {
        self.resolver.top().and_then(PendingDecision::for_frame)
    }
}
