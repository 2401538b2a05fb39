//! Single-entry in-memory cache with expiry timestamps
//!
//! Provides a `DatasetCache` that holds at most one value at a time. Every
//! write overwrites the previous entry wholesale; entries are never deleted
//! explicitly and expire purely by TTL check on read.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// Wrapper struct for a cached value with its timestamps
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
    /// When the cache entry expires
    expires_at: DateTime<Utc>,
}

/// Result of reading from the cache, including metadata about freshness
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
    /// Whether the cache entry has expired
    pub is_expired: bool,
}

/// Holds the most recent dataset with a time-to-live.
///
/// The mutex only guards against read/write tearing on the entry itself;
/// it does not enforce single-fetch semantics. Concurrent cache misses may
/// each fetch upstream and overwrite the entry independently (last write
/// wins), which is fine because every writer stores the same idempotent
/// payload and the TTL bounds staleness.
///
/// All operations take the current time as a parameter so callers (and
/// tests) control the clock.
#[derive(Debug)]
pub struct DatasetCache<T> {
    /// The single cache slot
    entry: Mutex<Option<CacheEntry<T>>>,
    /// How long an entry is considered fresh
    ttl: Duration,
}

impl<T: Clone> DatasetCache<T> {
    /// Creates an empty cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: Mutex::new(None),
            ttl,
        }
    }

    /// Stores a value, overwriting any previous entry.
    ///
    /// # Arguments
    /// * `data` - The value to cache
    /// * `now` - The current time; the entry expires at `now + ttl`
    pub fn set(&self, data: T, now: DateTime<Utc>) {
        let entry = CacheEntry {
            data,
            cached_at: now,
            expires_at: now + self.ttl,
        };
        let mut slot = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(entry);
    }

    /// Reads the cached value, if any.
    ///
    /// Expired entries are still returned (with `is_expired = true`) so the
    /// caller decides the refresh policy.
    ///
    /// # Arguments
    /// * `now` - The current time used for the expiry check
    ///
    /// # Returns
    /// * `Some(CachedData<T>)` if an entry exists
    /// * `None` if the cache is empty
    pub fn get(&self, now: DateTime<Utc>) -> Option<CachedData<T>> {
        let slot = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|entry| CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
            is_expired: now > entry.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_get_returns_none_when_empty() {
        let cache: DatasetCache<Vec<u32>> = DatasetCache::new(Duration::seconds(3600));
        assert!(cache.get(t0()).is_none());
    }

    #[test]
    fn test_get_within_ttl_is_fresh() {
        let cache = DatasetCache::new(Duration::seconds(3600));
        cache.set(vec![1, 2, 3], t0());

        let result = cache.get(t0() + Duration::seconds(3599)).expect("entry exists");
        assert_eq!(result.data, vec![1, 2, 3]);
        assert_eq!(result.cached_at, t0());
        assert!(!result.is_expired);
    }

    #[test]
    fn test_get_after_ttl_is_expired() {
        let cache = DatasetCache::new(Duration::seconds(3600));
        cache.set(vec![1], t0());

        let result = cache.get(t0() + Duration::seconds(3601)).expect("entry exists");
        assert_eq!(result.data, vec![1]);
        assert!(result.is_expired);
    }

    #[test]
    fn test_set_overwrites_previous_entry() {
        let cache = DatasetCache::new(Duration::seconds(3600));
        cache.set(vec![1], t0());
        cache.set(vec![2], t0() + Duration::seconds(10));

        let result = cache.get(t0() + Duration::seconds(10)).expect("entry exists");
        assert_eq!(result.data, vec![2]);
        assert_eq!(result.cached_at, t0() + Duration::seconds(10));
    }

    #[test]
    fn test_overwrite_resets_expiry() {
        let cache = DatasetCache::new(Duration::seconds(100));
        cache.set(vec![1], t0());
        // First entry would expire at t0 + 100
        cache.set(vec![2], t0() + Duration::seconds(90));

        let result = cache
            .get(t0() + Duration::seconds(150))
            .expect("entry exists");
        assert!(!result.is_expired, "Overwrite should restart the TTL window");
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache = DatasetCache::new(Duration::zero());
        cache.set(vec![1], t0());

        let result = cache.get(t0() + Duration::seconds(1)).expect("entry exists");
        assert!(result.is_expired);
    }
}
