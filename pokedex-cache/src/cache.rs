//! In-memory cache whose entries expire one interval after insertion.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::ResponseCache;

/// Shortest interval the reaper will tick at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Longest interval accepted. Keeps the reaper's first deadline representable.
const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Cached payload plus its insertion time. Never mutated after creation.
#[derive(Clone, Debug)]
struct CacheEntry {
    payload: Bytes,
    created_at: Instant,
}

impl CacheEntry {
    fn new(payload: Bytes) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, interval: Duration) -> bool {
        self.created_at.elapsed() >= interval
    }
}

/// State shared between the cache handle and its reaper task.
#[derive(Debug)]
struct Shared {
    entries: RwLock<HashMap<String, CacheEntry>>,
    interval: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl Shared {
    fn sweep(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.interval));
        let evicted = before - entries.len();
        drop(entries);

        if evicted > 0 {
            self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
            debug!(evicted, "Swept expired cache entries");
        } else {
            trace!("Sweep found nothing to evict");
        }
        evicted
    }
}

/// Concurrent key/value cache with a single TTL.
///
/// Every entry lives for `interval` after its last [`add`](Self::add). A
/// background task wakes every `interval` and evicts entries whose age has
/// reached it, so an entry disappears somewhere in `[interval, 2 * interval)`.
/// Reads never extend an entry's life.
///
/// One `RwLock` guards the whole map: reads share it, while writes and sweeps
/// take it exclusively. Payloads are [`Bytes`], replaced or removed whole, so a
/// reader never sees a partially written value.
///
/// The reaper stops on [`shutdown`](Self::shutdown) or when the cache is dropped.
#[derive(Debug)]
pub struct ExpiringCache {
    shared: Arc<Shared>,
    stop: Mutex<Option<oneshot::Sender<()>>>,
}

impl ExpiringCache {
    /// Creates an empty cache and starts its reaper.
    ///
    /// The interval is clamped to `[1 ms, 365 days]`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime. Use [`try_new`](Self::try_new)
    /// where no runtime is guaranteed.
    pub fn new(interval: Duration) -> Self {
        let interval = interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        let shared = Arc::new(Shared {
            entries: RwLock::new(HashMap::new()),
            interval,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        });

        let (stop_tx, stop_rx) = oneshot::channel();
        tokio::spawn(reap_loop(Arc::clone(&shared), stop_rx));
        debug!(?interval, "Started cache reaper");

        Self {
            shared,
            stop: Mutex::new(Some(stop_tx)),
        }
    }

    /// Like [`new`](Self::new), but fails instead of panicking when no Tokio
    /// runtime is running.
    pub fn try_new(interval: Duration) -> Result<Self> {
        tokio::runtime::Handle::try_current().map_err(|e| {
            PokedexError::ConfigError(format!("cache reaper needs a Tokio runtime: {}", e))
        })?;
        Ok(Self::new(interval))
    }

    /// Stores `payload` under `key`, replacing any previous entry and resetting its age.
    pub fn add(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        let entry = CacheEntry::new(payload.into());
        self.shared.entries.write().insert(key.into(), entry);
    }

    /// Returns the payload stored under `key` if it has not been swept yet.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let payload = self.shared.entries.read().get(key).map(|e| e.payload.clone());
        let counter = if payload.is_some() { &self.shared.hits } else { &self.shared.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        payload
    }

    /// Runs one reaper pass now. Returns the number of evicted entries.
    pub fn sweep(&self) -> usize {
        self.shared.sweep()
    }

    /// Stops the reaper. Entries already stored stay readable but no longer expire.
    ///
    /// Calling this more than once is harmless.
    pub fn shutdown(&self) {
        if let Some(stop) = self.stop.lock().take() {
            let _ = stop.send(());
        }
    }

    /// Returns false once [`shutdown`](Self::shutdown) has been called.
    pub fn is_running(&self) -> bool {
        self.stop.lock().is_some()
    }

    /// TTL and reaper period.
    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.shared.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.shared.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.shared.hits.load(Ordering::Relaxed),
            misses: self.shared.misses.load(Ordering::Relaxed),
            evictions: self.shared.evictions.load(Ordering::Relaxed),
            interval: self.shared.interval,
        }
    }
}

impl ResponseCache for ExpiringCache {
    fn get(&self, key: &str) -> Option<Bytes> {
        ExpiringCache::get(self, key)
    }

    fn add(&self, key: &str, payload: Bytes) {
        ExpiringCache::add(self, key, payload)
    }
}

async fn reap_loop(shared: Arc<Shared>, mut stop: oneshot::Receiver<()>) {
    let period = shared.interval;
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // Fires on an explicit stop and when the cache handle is dropped.
            _ = &mut stop => break,
            _ = ticker.tick() => {
                shared.sweep();
            }
        }
    }
    debug!("Cache reaper stopped");
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Stored entries, including expired ones not yet swept
    pub entries: usize,
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries removed by sweeps
    pub evictions: u64,
    /// TTL and reaper period
    pub interval: Duration,
}

impl CacheStats {
    /// Fraction of lookups that hit, or 0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_cache_miss_then_hit() {
        let cache = ExpiringCache::new(LONG);
        assert!(cache.get("pikachu").is_none());

        cache.add("pikachu", &b"{\"id\":25}"[..]);

        assert_eq!(cache.get("pikachu").unwrap(), Bytes::from_static(b"{\"id\":25}"));
    }

    #[tokio::test]
    async fn test_cache_overwrite() {
        let cache = ExpiringCache::new(LONG);
        cache.add("k", &b"first"[..]);
        cache.add("k", &b"second payload"[..]);

        assert_eq!(cache.get("k").unwrap(), Bytes::from_static(b"second payload"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_expiry() {
        let cache = ExpiringCache::new(Duration::from_millis(100));
        cache.add("x", &b"a"[..]);

        // At least two reaper ticks
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(cache.get("x").is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[tokio::test]
    async fn test_cache_no_premature_expiry() {
        let cache = ExpiringCache::new(Duration::from_secs(1));
        cache.add("x", &b"v"[..]);
        assert_eq!(cache.get("x").unwrap(), Bytes::from_static(b"v"));
    }

    #[tokio::test]
    async fn test_reads_do_not_extend_ttl() {
        let cache = ExpiringCache::new(Duration::from_millis(100));
        cache.add("x", &b"v"[..]);

        let mut seen_after_expiry = false;
        for _ in 0..15 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            seen_after_expiry = cache.get("x").is_some();
        }

        assert!(!seen_after_expiry);
    }

    #[tokio::test]
    async fn test_independent_keys() {
        let cache = ExpiringCache::new(Duration::from_millis(200));
        cache.add("a", &b"v1"[..]);
        tokio::time::sleep(Duration::from_millis(120)).await;
        cache.add("b", &b"v2"[..]);
        tokio::time::sleep(Duration::from_millis(100)).await;

        // "a" is past its interval, "b" is not
        cache.sweep();

        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b").unwrap(), Bytes::from_static(b"v2"));
    }

    #[tokio::test]
    async fn test_manual_sweep_keeps_fresh_entries() {
        let cache = ExpiringCache::new(LONG);
        cache.add("a", &b"1"[..]);
        cache.add("b", &b"2"[..]);

        assert_eq!(cache.sweep(), 0);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_shutdown_stops_eviction() {
        let cache = ExpiringCache::new(Duration::from_millis(50));
        assert!(cache.is_running());

        cache.shutdown();
        cache.shutdown();
        assert!(!cache.is_running());

        cache.add("x", &b"kept"[..]);
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.get("x").unwrap(), Bytes::from_static(b"kept"));
        // A manual sweep still applies the TTL
        assert_eq!(cache.sweep(), 1);
    }

    #[tokio::test]
    async fn test_zero_interval_is_clamped() {
        let cache = ExpiringCache::new(Duration::ZERO);
        assert_eq!(cache.interval(), MIN_INTERVAL);
    }

    #[tokio::test]
    async fn test_huge_interval_is_clamped() {
        let cache = ExpiringCache::new(Duration::from_secs(u64::MAX));
        assert_eq!(cache.interval(), MAX_INTERVAL);

        cache.add("mew", &b"151"[..]);
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Reaper task still alive and holding its reference
        assert_eq!(Arc::strong_count(&cache.shared), 2);
        assert!(cache.is_running());
        assert_eq!(cache.get("mew").unwrap(), Bytes::from_static(b"151"));
    }

    #[tokio::test]
    async fn test_drop_stops_reaper() {
        let cache = ExpiringCache::new(LONG);
        let shared = Arc::downgrade(&cache.shared);
        assert_eq!(shared.strong_count(), 2);

        drop(cache);
        for _ in 0..10 {
            if shared.strong_count() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(shared.strong_count(), 0);
    }

    #[test]
    fn test_try_new_outside_runtime() {
        let err = ExpiringCache::try_new(LONG).unwrap_err();
        assert!(matches!(err, PokedexError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_try_new_inside_runtime() {
        let cache = ExpiringCache::try_new(LONG).unwrap();
        assert!(cache.is_running());
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let cache = ExpiringCache::new(LONG);
        cache.add("a", &b"1"[..]);
        cache.get("a");
        cache.get("a");
        cache.get("b");

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.interval, LONG);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_response_cache_trait() {
        let cache: Arc<dyn ResponseCache> = Arc::new(ExpiringCache::new(LONG));
        cache.add("https://pokeapi.co/api/v2/pokemon/ditto/", Bytes::from_static(b"{}"));
        assert!(cache.get("https://pokeapi.co/api/v2/pokemon/ditto/").is_some());
        assert!(cache.get("https://pokeapi.co/api/v2/pokemon/mew/").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_readers_and_writers() {
        const WRITERS: usize = 8;
        const READERS: usize = 8;
        const KEYS_PER_WRITER: usize = 200;

        let cache = Arc::new(ExpiringCache::new(LONG));

        // Each payload is one repeated byte, so a torn read would show mixed bytes.
        let payload_for = |writer: usize, i: usize| {
            let fill = ((writer * KEYS_PER_WRITER + i) % 251) as u8;
            vec![fill; 512 + i]
        };

        std::thread::scope(|s| {
            for w in 0..WRITERS {
                let cache = &cache;
                s.spawn(move || {
                    for i in 0..KEYS_PER_WRITER {
                        cache.add(format!("w{w}-k{i}"), payload_for(w, i));
                    }
                });
            }
            for r in 0..READERS {
                let cache = &cache;
                s.spawn(move || {
                    for round in 0..KEYS_PER_WRITER * 2 {
                        let w = (r + round) % WRITERS;
                        let i = round % KEYS_PER_WRITER;
                        if let Some(payload) = cache.get(&format!("w{w}-k{i}")) {
                            assert_eq!(payload.as_ref(), payload_for(w, i).as_slice());
                        }
                    }
                });
            }
        });

        assert_eq!(cache.len(), WRITERS * KEYS_PER_WRITER);
        for w in 0..WRITERS {
            for i in 0..KEYS_PER_WRITER {
                let payload = cache.get(&format!("w{w}-k{i}")).unwrap();
                assert_eq!(payload.as_ref(), payload_for(w, i).as_slice());
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_overwrites_leave_one_whole_payload() {
        let cache = Arc::new(ExpiringCache::new(LONG));

        std::thread::scope(|s| {
            for fill in 0..8u8 {
                let cache = &cache;
                s.spawn(move || {
                    for _ in 0..200 {
                        cache.add("shared", vec![fill; 4096]);
                    }
                });
            }
        });

        let payload = cache.get("shared").unwrap();
        assert_eq!(payload.len(), 4096);
        assert!(payload.iter().all(|b| *b == payload[0]));
    }
}
