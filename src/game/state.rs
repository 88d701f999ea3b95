//! Main game state structure

use crate::core::{Card, CardName, Player, PlayerId};
use crate::game::events::{EventQueue, GameEvent, NoticeKind};
use crate::game::{
    GameLogger, OutputMode, Resolver, Supply, TurnPhase, TurnStructure, VerbosityLevel,
};
use crate::zones::Pile;
use crate::{DominionError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Setup options for a match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for shuffles and kingdom selection. `None` draws from OS
    /// entropy, so matches are not reproducible.
    pub seed: Option<u64>,

    /// Fixed kingdom (exactly ten distinct kingdom cards) instead of a
    /// random draw
    pub kingdom: Option<Vec<CardName>>,

    pub verbosity: VerbosityLevel,

    /// Where engine narration goes
    pub log_output: OutputMode,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_kingdom(mut self, kingdom: impl Into<Vec<CardName>>) -> Self {
        self.kingdom = Some(kingdom.into());
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_log_output(mut self, log_output: OutputMode) -> Self {
        self.log_output = log_output;
        self
    }
}

/// Complete game state
///
/// This is the session object: the transport owns exactly one per match and
/// passes it into every engine call. Nothing in the engine is global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Players in fixed seating order
    pub players: Vec<Player>,

    pub supply: Supply,

    /// Shared trash; cards never leave it on their own
    pub trash: Pile,

    pub turn: TurnStructure,

    /// Suspended effect frames
    pub resolver: Resolver,

    /// Events not yet consumed by the transport
    pub events: EventQueue,

    /// Random number generator for shuffles (serializable so a suspended
    /// game resumes with the same stream)
    pub rng: ChaCha12Rng,

    /// Engine diagnostics
    pub logger: GameLogger,
}

impl GameState {
    /// Start a match with a random kingdom and an entropy-seeded RNG
    pub fn new<S: AsRef<str>>(player_names: &[S]) -> Result<Self> {
        Self::with_config(player_names, &GameConfig::default())
    }

    pub fn with_config<S: AsRef<str>>(player_names: &[S], config: &GameConfig) -> Result<Self> {
        let player_count = player_names.len();
        if !(2..=4).contains(&player_count) {
            return Err(DominionError::InvalidPlayerCount(player_count));
        }

        let mut rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };

        let kingdom = match &config.kingdom {
            Some(kingdom) => kingdom.clone(),
            None => Supply::random_kingdom(&mut rng),
        };
        let supply = Supply::new(player_count, &kingdom)?;

        let players: Vec<Player> = player_names
            .iter()
            .enumerate()
            .map(|(seat, name)| {
                Player::with_starting_deck(PlayerId::new(seat), name.as_ref(), &mut rng)
            })
            .collect();

        let mut game = GameState {
            players,
            supply,
            trash: Pile::new(),
            turn: TurnStructure::new(PlayerId::new(0)),
            resolver: Resolver::new(),
            events: EventQueue::new(),
            rng,
            logger: GameLogger::with_verbosity(config.verbosity).with_output(config.log_output),
        };

        let names: Vec<&str> = player_names.iter().map(|n| n.as_ref()).collect();
        game.logger.minimal(&format!(
            "Starting game: {} (kingdom: {})",
            names.join(", "),
            kingdom.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
        ));
        game.events
            .public(format!("-- Starting game between {} --", names.join(", ")));
        game.begin_turn();

        Ok(game)
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id.seat()).ok_or(DominionError::OutOfRange {
            index: id.seat(),
            len: self.players.len(),
        })
    }

    /// Get a mutable player by ID
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        let len = self.players.len();
        self.players.get_mut(id.seat()).ok_or(DominionError::OutOfRange {
            index: id.seat(),
            len,
        })
    }

    /// Run `f` with a player and the game RNG borrowed together
    pub(crate) fn with_player_rng<R>(
        &mut self,
        id: PlayerId,
        f: impl FnOnce(&mut Player, &mut ChaCha12Rng) -> R,
    ) -> Result<R> {
        let len = self.players.len();
        let player = self
            .players
            .get_mut(id.seat())
            .ok_or(DominionError::OutOfRange {
                index: id.seat(),
                len,
            })?;
        Ok(f(player, &mut self.rng))
    }

    pub fn active_id(&self) -> PlayerId {
        self.turn.active_player
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.turn.active_player.seat()]
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.turn.is_over()
    }

    /// The player whose input the engine needs next: whoever must answer
    /// the pending decision, else the active player
    pub fn next_actor(&self) -> PlayerId {
        self.pending_decision()
            .map_or(self.turn.active_player, |pending| pending.player)
    }

    /// True when no effect is pending
    pub fn is_resolved(&self) -> bool {
        self.resolver.is_resolved()
    }

    /// Every other player, in seating order starting after `id`
    pub fn opponents_of(&self, id: PlayerId) -> Vec<PlayerId> {
        let n = self.players.len();
        (1..n).map(|offset| PlayerId::new((id.seat() + offset) % n)).collect()
    }

    /// Display name of a player ("?" for an unknown seat)
    pub(crate) fn name_of(&self, id: PlayerId) -> String {
        self.players
            .get(id.seat())
            .map(|p| p.name.to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    pub(crate) fn announce(&mut self, text: impl Into<String>) {
        self.events.public(text);
    }

    pub(crate) fn tell(&mut self, id: PlayerId, kind: NoticeKind, text: impl Into<String>) {
        if let Some(player) = self.players.get(id.seat()) {
            self.events.private(id, &player.name, kind, text);
        }
    }

    /// Report a recoverable usage error to one player
    pub(crate) fn reject(&mut self, id: PlayerId, text: impl Into<String>) {
        let text = text.into();
        self.logger
            .normal(&format!("rejected input from {}: {}", self.name_of(id), text));
        self.tell(id, NoticeKind::Error, text);
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Count of every distinct card across player piles, supply, trash and
    /// suspended frames
    pub fn card_census(&self) -> FxHashMap<Card, usize> {
        let mut census = FxHashMap::default();
        let cards = self
            .players
            .iter()
            .flat_map(|p| p.all_cards())
            .chain(self.supply.piles().flat_map(Pile::iter))
            .chain(self.trash.iter())
            .chain(self.resolver.held_cards());
        for card in cards {
            *census.entry(*card).or_insert(0) += 1;
        }
        census
    }

    /// Snapshot the whole session as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
