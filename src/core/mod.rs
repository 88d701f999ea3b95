//! Core game types: cards, players, and the strongly-typed names they use

pub mod card;
pub mod player;
pub mod types;

pub use card::{Card, CardType};
pub use player::Player;
pub use types::{CardName, PlayerId, PlayerName};
