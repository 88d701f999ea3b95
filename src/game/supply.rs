//! The supply: treasure, victory, kingdom and curse piles
//!
//! Piles are addressed by a flat slot index over the concatenation
//! (treasures, victories, kingdoms, curses): slots 0..3 are Copper, Silver,
//! Gold; 3..6 are Estate, Duchy, Province; 6..16 are the ten kingdom piles in
//! the order they were chosen; 16 is the curse pile.

use crate::core::{Card, CardName};
use crate::zones::Pile;
use crate::{DominionError, Result};
use serde::{Deserialize, Serialize};

/// Number of kingdom piles in a match
pub const KINGDOM_PILES: usize = 10;

/// Copies stamped for each kingdom pile other than Gardens
pub const KINGDOM_PILE_SIZE: usize = 10;

/// The game ends once this many or fewer supply piles remain non-empty
/// (17 piles, so three empty piles end the game).
pub const GAME_OVER_PILE_THRESHOLD: usize = 14;

/// Slot index of the curse pile
pub const CURSE_SLOT: usize = 6 + KINGDOM_PILES;

/// Total number of supply slots
pub const SLOT_COUNT: usize = CURSE_SLOT + 1;

/// Pile sizes for one player count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PileSizes {
    pub copper: usize,
    pub silver: usize,
    pub gold: usize,
    /// Estate, Duchy, Province and Gardens each
    pub victory: usize,
    pub curses: usize,
}

impl PileSizes {
    pub fn for_players(player_count: usize) -> Result<Self> {
        let sizes = match player_count {
            2 => PileSizes {
                copper: 46,
                silver: 40,
                gold: 30,
                victory: 8,
                curses: 10,
            },
            3 => PileSizes {
                copper: 39,
                silver: 40,
                gold: 30,
                victory: 12,
                curses: 20,
            },
            4 => PileSizes {
                copper: 32,
                silver: 40,
                gold: 30,
                victory: 12,
                curses: 30,
            },
            n => return Err(DominionError::InvalidPlayerCount(n)),
        };
        Ok(sizes)
    }

    /// Copies stamped for a kingdom pile of this card
    pub fn kingdom(&self, name: CardName) -> usize {
        if name == CardName::Gardens {
            self.victory
        } else {
            KINGDOM_PILE_SIZE
        }
    }
}

/// Everything players can buy or gain from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    /// Copper, Silver, Gold
    pub treasures: [Pile; 3],
    /// Estate, Duchy, Province
    pub victories: [Pile; 3],
    pub kingdoms: Vec<Pile>,
    pub curses: Pile,
}

impl Supply {
    /// Stamp every pile for `player_count` players with the given kingdom
    pub fn new(player_count: usize, kingdom: &[CardName]) -> Result<Self> {
        let sizes = PileSizes::for_players(player_count)?;
        validate_kingdom(kingdom)?;

        let stamp = |name, count| Pile::from_cards(Card::copies(name, count));

        Ok(Supply {
            treasures: [
                stamp(CardName::Copper, sizes.copper),
                stamp(CardName::Silver, sizes.silver),
                stamp(CardName::Gold, sizes.gold),
            ],
            victories: [
                stamp(CardName::Estate, sizes.victory),
                stamp(CardName::Duchy, sizes.victory),
                stamp(CardName::Province, sizes.victory),
            ],
            kingdoms: kingdom
                .iter()
                .map(|&name| stamp(name, sizes.kingdom(name)))
                .collect(),
            curses: stamp(CardName::Curse, sizes.curses),
        })
    }

    /// Choose 10 of the 25 kingdom cards: shuffle the whole pool, take the
    /// first ten
    pub fn random_kingdom(rng: &mut impl rand::Rng) -> Vec<CardName> {
        use rand::seq::SliceRandom;
        let mut pool = CardName::KINGDOM.to_vec();
        pool.shuffle(rng);
        pool.truncate(KINGDOM_PILES);
        pool
    }

    pub fn slot(&self, index: usize) -> Option<&Pile> {
        match index {
            0..=2 => self.treasures.get(index),
            3..=5 => self.victories.get(index - 3),
            CURSE_SLOT => Some(&self.curses),
            _ => self.kingdoms.get(index.checked_sub(6)?),
        }
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Pile> {
        match index {
            0..=2 => self.treasures.get_mut(index),
            3..=5 => self.victories.get_mut(index - 3),
            CURSE_SLOT => Some(&mut self.curses),
            _ => self.kingdoms.get_mut(index.checked_sub(6)?),
        }
    }

    /// All piles in slot order
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.treasures
            .iter()
            .chain(self.victories.iter())
            .chain(self.kingdoms.iter())
            .chain(std::iter::once(&self.curses))
    }

    pub fn slot_count(&self) -> usize {
        self.piles().count()
    }

    /// Slot holding the named basic card (treasure, victory or curse)
    pub fn basic_slot(name: CardName) -> Option<usize> {
        match name {
            CardName::Copper => Some(0),
            CardName::Silver => Some(1),
            CardName::Gold => Some(2),
            CardName::Estate => Some(3),
            CardName::Duchy => Some(4),
            CardName::Province => Some(5),
            CardName::Curse => Some(CURSE_SLOT),
            _ => None,
        }
    }

    /// Slot holding the named card, if it is in this supply at all
    pub fn slot_of(&self, name: CardName) -> Option<usize> {
        Self::basic_slot(name).or_else(|| {
            self.kingdoms
                .iter()
                .position(|pile| pile.peek_top().map(|c| c.name) == Some(name))
                .map(|pos| pos + 6)
        })
    }

    /// Number of non-empty piles, curses included
    pub fn pile_count(&self) -> usize {
        self.piles().filter(|pile| !pile.is_empty()).count()
    }

    /// Provinces are gone, or enough piles have run out
    pub fn is_game_over(&self) -> bool {
        self.victories[2].is_empty() || self.pile_count() <= GAME_OVER_PILE_THRESHOLD
    }

    pub fn total_cards(&self) -> usize {
        self.piles().map(Pile::len).sum()
    }
}

fn validate_kingdom(kingdom: &[CardName]) -> Result<()> {
    if kingdom.len() != KINGDOM_PILES {
        return Err(DominionError::InvalidKingdom(format!(
            "expected {KINGDOM_PILES} piles, got {}",
            kingdom.len()
        )));
    }
    if let Some(name) = kingdom.iter().find(|name| !name.is_kingdom()) {
        return Err(DominionError::InvalidKingdom(format!(
            "{name} is not a kingdom card"
        )));
    }
    let mut sorted = kingdom.to_vec();
    sorted.sort();
    sorted.dedup();
    if sorted.len() != kingdom.len() {
        return Err(DominionError::InvalidKingdom(
            "kingdom piles must be distinct".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn kingdom() -> Vec<CardName> {
        CardName::KINGDOM[..KINGDOM_PILES].to_vec()
    }

    #[test]
    fn test_pile_sizes_by_player_count() {
        let two = Supply::new(2, &kingdom()).unwrap();
        assert_eq!(two.treasures[0].len(), 46);
        assert_eq!(two.victories[2].len(), 8);
        assert_eq!(two.curses.len(), 10);

        let four = Supply::new(4, &kingdom()).unwrap();
        assert_eq!(four.treasures[0].len(), 32);
        assert_eq!(four.treasures[1].len(), 40);
        assert_eq!(four.treasures[2].len(), 30);
        assert_eq!(four.victories[0].len(), 12);
        assert_eq!(four.curses.len(), 30);
    }

    #[test]
    fn test_invalid_player_count() {
        assert!(matches!(
            Supply::new(5, &kingdom()),
            Err(DominionError::InvalidPlayerCount(5))
        ));
        assert!(matches!(
            Supply::new(1, &kingdom()),
            Err(DominionError::InvalidPlayerCount(1))
        ));
    }

    #[test]
    fn test_gardens_sized_like_victory_piles() {
        // Militia through Laboratory, then Gardens in the first kingdom slot
        let mut names = CardName::KINGDOM[10..20].to_vec();
        names[0] = CardName::Gardens;
        let two = Supply::new(2, &names).unwrap();
        let three = Supply::new(3, &names).unwrap();
        assert_eq!(two.kingdoms[0].len(), 8);
        assert_eq!(three.kingdoms[0].len(), 12);
        assert_eq!(three.kingdoms[1].len(), 10);
    }

    #[test]
    fn test_invalid_kingdoms() {
        let mut dupes = kingdom();
        dupes[1] = dupes[0];
        assert!(matches!(
            Supply::new(2, &dupes),
            Err(DominionError::InvalidKingdom(_))
        ));

        let mut basic = kingdom();
        basic[3] = CardName::Gold;
        assert!(Supply::new(2, &basic).is_err());

        assert!(Supply::new(2, &kingdom()[..9]).is_err());
    }

    #[test]
    fn test_random_kingdom() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let names = Supply::random_kingdom(&mut rng);
        assert_eq!(names.len(), KINGDOM_PILES);
        assert!(Supply::new(3, &names).is_ok());
    }

    #[test]
    fn test_slots() {
        let supply = Supply::new(2, &kingdom()).unwrap();
        assert_eq!(supply.slot_count(), SLOT_COUNT);
        assert_eq!(supply.slot(0).unwrap().peek_top().unwrap().name, CardName::Copper);
        assert_eq!(supply.slot(5).unwrap().peek_top().unwrap().name, CardName::Province);
        assert_eq!(supply.slot(6).unwrap().peek_top().unwrap().name, CardName::Cellar);
        assert_eq!(supply.slot(CURSE_SLOT).unwrap().peek_top().unwrap().name, CardName::Curse);
        assert!(supply.slot(SLOT_COUNT).is_none());
        assert_eq!(supply.slot_of(CardName::Chapel), Some(7));
        assert_eq!(supply.slot_of(CardName::Witch), None);
    }

    #[test]
    fn test_game_over_conditions() {
        let mut supply = Supply::new(2, &kingdom()).unwrap();
        assert_eq!(supply.pile_count(), SLOT_COUNT);
        assert!(!supply.is_game_over());

        supply.kingdoms[0].remove_all();
        supply.kingdoms[1].remove_all();
        assert!(!supply.is_game_over());
        supply.curses.remove_all();
        assert_eq!(supply.pile_count(), 14);
        assert!(supply.is_game_over());

        let mut supply = Supply::new(2, &kingdom()).unwrap();
        supply.victories[2].remove_all();
        assert!(supply.is_game_over());
    }
}
