//! Zoo world model: depot, battery budget, food storages and enclosures.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Feeding category shared by storages and enclosures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Diet {
    #[cfg_attr(feature = "serde", serde(rename = "c", alias = "carnivore"))]
    Carnivore,
    #[cfg_attr(feature = "serde", serde(rename = "h", alias = "herbivore"))]
    Herbivore,
    #[cfg_attr(feature = "serde", serde(rename = "o", alias = "omnivore"))]
    Omnivore,
}

impl Diet {
    /// Trial order: carnivore, herbivore, omnivore.
    pub const ALL: [Diet; 3] = [Diet::Carnivore, Diet::Herbivore, Diet::Omnivore];

    /// Single-letter code used by the input format.
    pub fn letter(self) -> char {
        match self {
            Diet::Carnivore => 'c',
            Diet::Herbivore => 'h',
            Diet::Omnivore => 'o',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'c' => Some(Diet::Carnivore),
            'h' => Some(Diet::Herbivore),
            'o' => Some(Diet::Omnivore),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Diet::Carnivore => "carnivore",
            Diet::Herbivore => "herbivore",
            Diet::Omnivore => "omnivore",
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown diet `{0}` (expected c, h, o or a full diet name)")]
pub struct ParseDietError(pub String);

impl FromStr for Diet {
    type Err = ParseDietError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            if let Some(diet) = Diet::from_letter(letter) {
                return Ok(diet);
            }
        }
        Diet::ALL
            .into_iter()
            .find(|diet| diet.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDietError(s.to_string()))
    }
}

/// Index of a storage in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StorageId(pub usize);

/// Index of an enclosure in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnclosureId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FoodStorage {
    pub position: Position,
    pub diet: Diet,
}

impl FoodStorage {
    pub fn new(position: Position, diet: Diet) -> Self {
        Self { position, diet }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Enclosure {
    pub position: Position,
    /// Non-negative weight credited by the scorer when the enclosure is fed.
    pub importance: f64,
    pub diet: Diet,
}

impl Enclosure {
    pub fn new(position: Position, importance: f64, diet: Diet) -> Self {
        Self {
            position,
            importance,
            diet,
        }
    }
}

/// The whole zoo as loaded from one input file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Zoo {
    /// Bounding dimensions. Informational only.
    pub dimensions: Position,
    pub depot: Position,
    /// Travel budget in distance units.
    pub battery_capacity: f64,
    pub storages: Vec<FoodStorage>,
    pub enclosures: Vec<Enclosure>,
}

impl Zoo {
    pub fn new(
        dimensions: Position,
        depot: Position,
        battery_capacity: f64,
        storages: Vec<FoodStorage>,
        enclosures: Vec<Enclosure>,
    ) -> Self {
        Self {
            dimensions,
            depot,
            battery_capacity,
            storages,
            enclosures,
        }
    }

    /// Storages serving `diet`, in load order.
    pub fn storages_for(&self, diet: Diet) -> impl Iterator<Item = (StorageId, &FoodStorage)> {
        self.storages
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.diet == diet)
            .map(|(idx, s)| (StorageId(idx), s))
    }

    /// Enclosures requiring `diet`, in load order.
    pub fn enclosures_for(&self, diet: Diet) -> impl Iterator<Item = (EnclosureId, &Enclosure)> {
        self.enclosures
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.diet == diet)
            .map(|(idx, e)| (EnclosureId(idx), e))
    }
}
