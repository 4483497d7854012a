//! Defaults for the PokeAPI client, the response cache, and catch rolls.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// POKEAPI
// ═══════════════════════════════════════════════════════════════════════════════

/// Public PokeAPI v2 root. Must end with `/` so relative paths join under it.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Path segment for location-area resources.
pub const LOCATION_AREA_ENDPOINT: &str = "location-area";

/// Path segment for creature resources.
pub const POKEMON_ENDPOINT: &str = "pokemon";

/// Location areas listed per `map` page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Reaper interval and entry TTL in seconds (5 minutes).
pub const DEFAULT_CACHE_INTERVAL_SECONDS: u64 = 300;

/// [`DEFAULT_CACHE_INTERVAL_SECONDS`] as a `Duration`.
pub const DEFAULT_CACHE_INTERVAL: Duration = Duration::from_secs(DEFAULT_CACHE_INTERVAL_SECONDS);

// ═══════════════════════════════════════════════════════════════════════════════
// CATCHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Base experience at which a creature can no longer be caught.
/// Legendaries sit around 300-340, so they stay catchable but rarely.
pub const MAX_BASE_EXPERIENCE: u32 = 500;
