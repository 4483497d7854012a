//! Time-expiring response cache for Pokedex.
//!
//! Raw response bodies are stored by key and dropped by a background reaper
//! once they are one interval old.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{CacheStats, ExpiringCache};
