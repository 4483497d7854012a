//! Location-area resources as served by PokeAPI.

use serde::{Deserialize, Serialize};

/// Name plus canonical URL of another API resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name (e.g. "canalave-city-area")
    pub name: String,
    /// Canonical URL of the full resource
    #[serde(default)]
    pub url: String,
}

/// One page of `GET /location-area`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas
    pub count: u32,
    /// URL of the next page, absent on the last page
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    pub previous: Option<String>,
    /// Areas on this page
    pub results: Vec<NamedResource>,
}

impl LocationAreaPage {
    /// Names of the areas on this page, in API order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.name.as_str())
    }
}

/// A single location area with its encounters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationArea {
    /// Numeric id
    #[serde(default)]
    pub id: u32,
    /// Area name
    pub name: String,
    /// Creatures that can be encountered here
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Names of the creatures found in this area, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters.iter().map(|e| e.pokemon.name.as_str())
    }
}

/// A creature that can be met in a location area.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokemonEncounter {
    /// The creature
    pub pokemon: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_json() {
        let json = r#"{
            "count": 1089,
            "next": "https://pokeapi.co/api/v2/location-area?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"},
                {"name": "eterna-city-area", "url": "https://pokeapi.co/api/v2/location-area/2/"}
            ]
        }"#;

        let page: LocationAreaPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1089);
        assert!(page.previous.is_none());
        assert!(page.next.unwrap().contains("offset=20"));
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn test_area_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "canalave-city-area",
            "game_index": 1,
            "encounter_method_rates": [],
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": "https://pokeapi.co/api/v2/pokemon/72/"}, "version_details": []},
                {"pokemon": {"name": "tentacruel", "url": "https://pokeapi.co/api/v2/pokemon/73/"}, "version_details": []}
            ]
        }"#;

        let area: LocationArea = serde_json::from_str(json).unwrap();
        let names: Vec<_> = area.pokemon_names().collect();
        assert_eq!(names, vec!["tentacool", "tentacruel"]);
    }

    #[test]
    fn test_area_without_encounters() {
        let area: LocationArea = serde_json::from_str(r#"{"name": "empty-area"}"#).unwrap();
        assert_eq!(area.pokemon_names().count(), 0);
    }
}
