//! Session settings: client config plus response cache lifetime.

use std::time::Duration;

use pokedex_api::ClientConfig;
use pokedex_core::constants::DEFAULT_CACHE_INTERVAL;

#[derive(Clone, Debug)]
pub struct Settings {
    pub client: ClientConfig,
    /// TTL and reaper period of the response cache
    pub cache_interval: Duration,
    pub enable_cache: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            cache_interval: DEFAULT_CACHE_INTERVAL,
            enable_cache: true,
        }
    }
}

impl Settings {
    pub fn with_client(client: ClientConfig) -> Self {
        Self {
            client,
            ..Default::default()
        }
    }

    /// Disables caching.
    pub fn no_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.enable_cache);
        assert_eq!(settings.cache_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_builder() {
        let settings = Settings::with_client(ClientConfig::with_base_url("http://localhost:9000/")).no_cache();
        assert_eq!(settings.client.base_url, "http://localhost:9000/");
        assert!(!settings.enable_cache);
    }
}
