//! The collection of creatures caught during a session.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Pokemon;

/// A creature plus the moment it was caught.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaughtPokemon {
    /// The creature as fetched when it was caught
    pub pokemon: Pokemon,
    /// When the catch succeeded
    pub caught_at: DateTime<Utc>,
}

/// Caught creatures keyed by name.
///
/// Names iterate in alphabetical order. Catching the same creature twice
/// keeps the latest copy.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Pokedex {
    entries: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    /// Creates an empty Pokedex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch. Returns true if this creature was not caught before.
    pub fn insert(&mut self, pokemon: Pokemon) -> bool {
        let name = pokemon.name.clone();
        let caught = CaughtPokemon {
            pokemon,
            caught_at: Utc::now(),
        };
        self.entries.insert(name, caught).is_none()
    }

    /// Looks up a caught creature by name.
    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(&name.trim().to_lowercase())
    }

    /// Returns true if `name` has been caught.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Caught creature names, alphabetically.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct creatures caught.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been caught yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
