//! Spell references and spell levels.
//!
//! A dialog only needs two facts about a spell: its base level and whether it
//! carries the `cantrip` trait. Everything else rides along so the completion
//! handler can build the final item.

use crate::error::SelectionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Highest level a spell consumable can be made at.
pub const MAX_LEVEL: u8 = 10;

/// Trait tag that marks a spell as a cantrip.
pub const CANTRIP_TRAIT: &str = "cantrip";

/// A spell level in `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(0);
    pub const MAX: Level = Level(MAX_LEVEL);

    /// Create a level, rejecting anything above 10.
    pub fn new(level: u8) -> Result<Self, SelectionError> {
        if level > MAX_LEVEL {
            return Err(SelectionError::LevelOutOfRange(level as i64));
        }
        Ok(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every level from this one up to 10, inclusive and ascending.
    pub fn range_to_max(self) -> impl Iterator<Item = Level> {
        (self.0..=MAX_LEVEL).map(Level)
    }
}

impl TryFrom<i64> for Level {
    type Error = SelectionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| SelectionError::LevelOutOfRange(value))
            .and_then(Level::new)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A known spell, as handed to the dialog by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub base_level: Level,
    #[serde(default)]
    pub traits: BTreeSet<String>,
}

impl Spell {
    pub fn new(name: impl Into<String>, base_level: Level) -> Self {
        Self {
            name: name.into(),
            base_level,
            traits: BTreeSet::new(),
        }
    }

    /// A spell tagged with the cantrip trait.
    pub fn cantrip(name: impl Into<String>, base_level: Level) -> Self {
        Self::new(name, base_level).with_trait(CANTRIP_TRAIT)
    }

    /// Add a trait tag.
    pub fn with_trait(mut self, tag: impl Into<String>) -> Self {
        self.traits.insert(tag.into());
        self
    }

    pub fn is_cantrip(&self) -> bool {
        self.traits.contains(CANTRIP_TRAIT)
    }
}
