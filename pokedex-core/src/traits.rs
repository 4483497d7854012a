//! Common traits for Pokedex.
//!
//! The HTTP client only needs two operations from its cache, so it talks to
//! this trait instead of a concrete store.

use bytes::Bytes;

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE CACHE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Store for raw, undecoded response bodies keyed by request.
///
/// Implementations must be safe to share between threads. Neither operation
/// can fail: a miss is reported as `None`, never as an error.
pub trait ResponseCache: Send + Sync {
    /// Returns the cached payload for `key`, if any.
    ///
    /// Reading must not extend the entry's lifetime.
    fn get(&self, key: &str) -> Option<Bytes>;

    /// Inserts or replaces the payload stored under `key`.
    fn add(&self, key: &str, payload: Bytes);
}
