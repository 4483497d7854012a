//! HTTP client for PokeAPI v2.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use url::Url;

use pokedex_core::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECONDS, LOCATION_AREA_ENDPOINT,
    POKEMON_ENDPOINT,
};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::ResponseCache;
use pokedex_core::types::{LocationArea, LocationAreaPage, Pokemon};

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API root (e.g. "https://pokeapi.co/api/v2/")
    pub base_url: String,
    /// Location areas per page
    pub page_size: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at another API root (mirrors, mock servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the number of location areas per page.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// PokeAPI client with an optional response cache in front of the network.
///
/// Every lookup is keyed by its fully resolved URL. On a hit the cached body
/// is decoded and no request is sent. On a miss the body is fetched, its
/// status checked, and the raw bytes cached before decoding, so the cache
/// never sees typed values.
pub struct PokeApiClient {
    config: ClientConfig,
    base_url: Url,
    http_client: reqwest::Client,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl PokeApiClient {
    /// Creates a client. Pass `None` to always hit the network.
    pub fn new(config: ClientConfig, cache: Option<Arc<dyn ResponseCache>>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PokedexError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PokedexError::InvalidUrl(config.base_url.clone()));
        }
        if config.page_size == 0 {
            return Err(PokedexError::ConfigError("page size must be at least 1".into()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PokedexError::ConfigError(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            base_url,
            http_client,
            cache,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns true if responses are cached.
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// URL of the first location-area page.
    pub fn first_page_url(&self) -> String {
        let mut url = self.endpoint_url(&[LOCATION_AREA_ENDPOINT]);
        url.query_pairs_mut()
            .append_pair("offset", "0")
            .append_pair("limit", &self.config.page_size.to_string());
        url.into()
    }

    /// Fetches a page of location areas from a URL returned by [`first_page_url`](Self::first_page_url)
    /// or a previous page's `next`/`previous` link.
    #[instrument(skip(self))]
    pub async fn location_areas(&self, page_url: &str) -> Result<LocationAreaPage> {
        self.fetch(page_url).await
    }

    /// Fetches a single location area by name or id.
    #[instrument(skip(self))]
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = self.resource_url(LOCATION_AREA_ENDPOINT, name)?;
        let area: LocationArea = self.fetch(&url).await?;
        info!(area = %area.name, encounters = area.pokemon_encounters.len(), "Resolved location area");
        Ok(area)
    }

    /// Fetches a creature by name or id.
    #[instrument(skip(self))]
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = self.resource_url(POKEMON_ENDPOINT, name)?;
        let pokemon: Pokemon = self.fetch(&url).await?;
        info!(pokemon = %pokemon.name, "Resolved pokemon");
        Ok(pokemon)
    }

    /// Cache-then-network lookup keyed by `url`.
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url) {
                debug!(url, bytes = body.len(), "Cache hit");
                return Ok(serde_json::from_slice(&body)?);
            }
            debug!(url, "Cache miss, fetching");
        }

        let body = self.download(url).await?;

        if let Some(cache) = &self.cache {
            cache.add(url, body.clone());
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// GETs `url` and returns the raw body of a successful response.
    async fn download(&self, url: &str) -> Result<Bytes> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Request failed");
            if e.is_timeout() {
                PokedexError::ConnectionTimeout(url.to_string())
            } else {
                PokedexError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            warn!(url, %status, "Unexpected status");
            return Err(PokedexError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| PokedexError::HttpError(e.to_string()))
    }

    /// `{base}/{endpoint}/{name}/` with the name normalized and percent-encoded.
    fn resource_url(&self, endpoint: &str, name: &str) -> Result<String> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(PokedexError::InvalidUrl(format!("empty {endpoint} name")));
        }
        Ok(self.endpoint_url(&[endpoint, &name, ""]).into())
    }

    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
