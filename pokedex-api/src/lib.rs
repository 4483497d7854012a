//! # Pokedex API
//!
//! PokeAPI v2 client that checks a [`ResponseCache`] before every request and
//! stores raw response bodies on a miss.
//!
//! ```rust,ignore
//! let cache: Arc<dyn ResponseCache> = Arc::new(ExpiringCache::new(DEFAULT_CACHE_INTERVAL));
//! let client = PokeApiClient::new(ClientConfig::default(), Some(cache))?;
//! let area = client.location_area("canalave-city-area").await?;
//! ```
//!
//! [`ResponseCache`]: pokedex_core::ResponseCache

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod pagination;

pub use client::{ClientConfig, PokeApiClient};
pub use pagination::LocationCursor;
