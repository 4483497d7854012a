//! Per-process REPL state: client, cache, map cursor and caught creatures.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use pokedex_api::{LocationCursor, PokeApiClient};
use pokedex_cache::{CacheStats, ExpiringCache};
use pokedex_core::catch::{attempt_catch, catch_probability};
use pokedex_core::constants::MAX_BASE_EXPERIENCE;
use pokedex_core::error::Result;
use pokedex_core::traits::ResponseCache;
use pokedex_core::types::{CaughtPokemon, LocationArea, LocationAreaPage, Pokedex, Pokemon};

use crate::config::Settings;

/// Result of one `catch`.
#[derive(Debug)]
pub struct CatchAttempt {
    pub pokemon: Pokemon,
    pub probability: f64,
    pub caught: bool,
    /// Caught and not in the Pokedex before
    pub first_catch: bool,
}

/// Owns the response cache for the lifetime of the REPL and hands it to the client.
pub struct Session {
    client: PokeApiClient,
    cache: Option<Arc<ExpiringCache>>,
    cursor: LocationCursor,
    pokedex: Pokedex,
    rng: StdRng,
}

impl Session {
    /// Builds the cache (if enabled) and the client.
    ///
    /// Fails with a config error when caching is enabled outside a Tokio runtime.
    pub fn new(settings: &Settings) -> Result<Self> {
        let cache = if settings.enable_cache {
            Some(Arc::new(ExpiringCache::try_new(settings.cache_interval)?))
        } else {
            None
        };
        let client = PokeApiClient::new(
            settings.client.clone(),
            cache.clone().map(|c| c as Arc<dyn ResponseCache>),
        )?;

        Ok(Self {
            client,
            cache,
            cursor: LocationCursor::new(),
            pokedex: Pokedex::new(),
            rng: StdRng::from_entropy(),
        })
    }

    /// Replaces the catch RNG, for reproducible rolls.
    #[cfg(test)]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub async fn map(&mut self) -> Result<LocationAreaPage> {
        self.cursor.next_page(&self.client).await
    }

    pub async fn map_back(&mut self) -> Result<LocationAreaPage> {
        self.cursor.previous_page(&self.client).await
    }

    pub async fn explore(&self, area: &str) -> Result<LocationArea> {
        self.client.location_area(area).await
    }

    pub async fn catch(&mut self, name: &str) -> Result<CatchAttempt> {
        let pokemon = self.client.pokemon(name).await?;
        let probability = catch_probability(pokemon.base_experience(), MAX_BASE_EXPERIENCE);
        let caught = attempt_catch(&pokemon, &mut self.rng);
        debug!(pokemon = %pokemon.name, probability, caught, "Rolled catch");

        let first_catch = caught && self.pokedex.insert(pokemon.clone());
        if first_catch {
            info!(pokemon = %pokemon.name, total = self.pokedex.len(), "New Pokedex entry");
        }

        Ok(CatchAttempt {
            pokemon,
            probability,
            caught,
            first_catch,
        })
    }

    pub fn inspect(&self, name: &str) -> Option<&CaughtPokemon> {
        self.pokedex.get(name)
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// `None` when caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// Stops the cache reaper.
    pub fn close(&self) {
        if let Some(cache) = &self.cache {
            cache.shutdown();
        }
    }
}
