//! Inbound commands
//!
//! The transport speaks in string tokens. Tokens are parsed at the boundary
//! into a tagged [`Command`]; while an effect is suspended the whole token is
//! an opaque payload for the resolver.

use crate::{DominionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Play every treasure in hand
    PlayAllTreasures,
    /// Finish the turn
    EndTurn,
    /// Play the card at this hand index
    PlayCard(usize),
    /// Buy from this supply slot
    BuyCard(usize),
    /// Answer for the suspended effect: an index list, a single index, or
    /// a "0"/"1" choice
    Payload(String),
}

impl Command {
    /// Parse a raw token. While an effect is resolving every token is a
    /// payload, exactly as received.
    pub fn parse(token: &str, resolving: bool) -> Result<Self> {
        if resolving {
            Ok(Command::Payload(token.to_string()))
        } else {
            token.parse()
        }
    }
}

impl FromStr for Command {
    type Err = DominionError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (head, arg) = match s.split_once(':') {
            Some((head, arg)) => (head.trim(), Some(arg.trim())),
            None => (s, None),
        };
        let index = |arg: Option<&str>| -> Result<usize> {
            arg.and_then(|a| a.parse().ok())
                .ok_or_else(|| DominionError::UnknownCommand(s.to_string()))
        };

        match head {
            "PlayAllTreasures" => Ok(Command::PlayAllTreasures),
            "EndTurn" => Ok(Command::EndTurn),
            "PlayCard" => Ok(Command::PlayCard(index(arg)?)),
            "BuyCard" => Ok(Command::BuyCard(index(arg)?)),
            "Payload" => Ok(Command::Payload(arg.unwrap_or_default().to_string())),
            _ => Err(DominionError::UnknownCommand(s.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PlayAllTreasures => write!(f, "PlayAllTreasures"),
            Command::EndTurn => write!(f, "EndTurn"),
            Command::PlayCard(idx) => write!(f, "PlayCard:{idx}"),
            Command::BuyCard(idx) => write!(f, "BuyCard:{idx}"),
            Command::Payload(raw) => write!(f, "Payload:{raw}"),
        }
    }
}
