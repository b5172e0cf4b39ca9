use sieve_cache::ShardedSieveCache;

use std::hash::Hash;

use crate::error::ServiceError;

/// Default number of entries kept by each memoization cache.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// The sharded cache splits its capacity across this many shards.
const MIN_CAPACITY: usize = 16;

/// A bounded, thread-safe memoization cache.
///
/// Entries are write-once: once a key has a value, later computations for the
/// same key return the stored value instead of replacing it.
#[derive(Clone)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    cache: ShardedSieveCache<K, V>,
    capacity: usize,
}

impl<K, V> std::fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("len", &self.cache.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Creates a cache holding roughly `capacity` entries.
    ///
    /// Capacities below the shard count are raised to it.
    pub fn new(capacity: usize) -> Result<Self, ServiceError> {
        if capacity == 0 {
            return Err(ServiceError::CacheCapacity {
                capacity,
                reason: "capacity must be positive".to_string(),
            });
        }

        let capacity = capacity.max(MIN_CAPACITY);
        let cache =
            ShardedSieveCache::new(capacity).map_err(|reason| ServiceError::CacheCapacity {
                capacity,
                reason: reason.to_string(),
            })?;

        Ok(Self { cache, capacity })
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key)
    }

    /// Inserts a key-value pair, replacing any previous value.
    pub fn insert(&self, key: K, value: V) -> bool {
        self.cache.insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retrieves a value from the cache, or computes it with `compute`.
    ///
    /// A successful result is stored unless another caller stored one for the
    /// same key first, in which case that value is returned. Errors are
    /// returned as they are and nothing is stored.
    pub fn get_or_try_insert_with<F, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.cache.get(&key) {
            return Ok(value);
        }

        let value = compute(&key)?;

        if let Some(existing) = self.cache.get(&key) {
            return Ok(existing);
        }
        self.cache.insert(key, value.clone());

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn it_computes_each_key_once() {
        let cache: Cache<String, usize> = Cache::new(64).unwrap();
        let calls = Cell::new(0);
        let compute = |key: &String| -> Result<usize, ()> {
            calls.set(calls.get() + 1);
            Ok(key.len())
        };

        assert_eq!(cache.get_or_try_insert_with("abc".into(), compute), Ok(3));
        assert_eq!(cache.get_or_try_insert_with("abc".into(), compute), Ok(3));
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn it_does_not_store_errors() {
        let cache: Cache<&'static str, usize> = Cache::new(64).unwrap();

        let failed: Result<usize, &str> = cache.get_or_try_insert_with("key", |_| Err("down"));
        assert_eq!(failed, Err("down"));
        assert!(cache.is_empty());

        let recovered: Result<usize, &str> = cache.get_or_try_insert_with("key", |_| Ok(7));
        assert_eq!(recovered, Ok(7));
        assert_eq!(cache.get(&"key"), Some(7));
    }

    #[test]
    fn the_first_stored_value_wins() {
        let cache: Cache<&'static str, usize> = Cache::new(64).unwrap();
        let result: Result<usize, ()> = cache.get_or_try_insert_with("key", |key| {
            cache.insert(*key, 1);
            Ok(2)
        });
        assert_eq!(result, Ok(1));
        assert_eq!(cache.get(&"key"), Some(1));
    }

    #[test]
    fn small_capacities_are_raised_and_zero_is_rejected() {
        let cache: Cache<u32, u32> = Cache::new(1).unwrap();
        assert_eq!(cache.capacity(), MIN_CAPACITY);
        assert!(Cache::<u32, u32>::new(0).is_err());
    }
}
