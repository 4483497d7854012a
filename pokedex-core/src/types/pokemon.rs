//! Creature resources as served by PokeAPI.

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// A creature from `GET /pokemon/{name}`.
///
/// Only the fields the REPL prints or rolls against are kept; serde drops the rest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pokemon {
    /// National dex number
    pub id: u32,
    /// Lowercase creature name
    pub name: String,
    /// Experience gained for defeating it; `null` for some forms
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: u32,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Elemental types, ordered by slot
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

impl Pokemon {
    /// Base experience, treating a missing value as zero.
    pub fn base_experience(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }

    /// Type names ordered by slot.
    pub fn type_names(&self) -> Vec<&str> {
        let mut types: Vec<_> = self.types.iter().collect();
        types.sort_by_key(|t| t.slot);
        types.into_iter().map(|t| t.kind.name.as_str()).collect()
    }
}

/// One base stat of a creature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Which stat (hp, attack, ...)
    pub stat: NamedResource,
    /// Base value
    pub base_stat: u32,
    /// Effort value yield
    #[serde(default)]
    pub effort: u32,
}

/// One elemental type slot of a creature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokemonType {
    /// Slot order (1 = primary)
    pub slot: u8,
    /// The type
    #[serde(rename = "type")]
    pub kind: NamedResource,
}
