//! In-memory query cache for resolved images
//!
//! Entries live for the lifetime of the process. By default the cache only grows;
//! an optional capacity turns on insertion-order eviction.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::models::ResolvedImage;

static GLOBAL_CACHE: OnceLock<Arc<QueryCache>> = OnceLock::new();

const KEY_SEPARATOR: char = '|';

/// Composite lookup key: primary name plus optional context.
///
/// No case or whitespace normalization is applied, so `"Taj Hotel"` and `"taj hotel"`
/// are different keys. An empty context is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn new(primary: &str, context: Option<&str>) -> Self {
        let context = context.filter(|c| !c.trim().is_empty()).unwrap_or_default();
        Self(format!("{primary}{KEY_SEPARATOR}{context}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default)]
struct Entries {
    images: HashMap<CacheKey, ResolvedImage>,
    insertion_order: VecDeque<CacheKey>,
}

/// Shared key -> image map
pub struct QueryCache {
    entries: RwLock<Entries>,
    capacity: Option<usize>,
}

impl QueryCache {
    /// Unbounded cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            capacity: None,
        }
    }

    /// Cache holding at most `capacity` images; the oldest insert is evicted first
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            capacity: Some(capacity.max(1)),
        }
    }

    #[tracing::instrument(name = "query_cache", level = "debug", skip(self, key), fields(key = %key))]
    pub fn get(&self, key: &CacheKey) -> Option<ResolvedImage> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let hit = entries.images.get(key).cloned();
        if hit.is_some() {
            tracing::debug!("Key found");
        } else {
            tracing::debug!("Key not found");
        }
        hit
    }

    /// Store an image. Overwriting an existing key replaces the value in place.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, key, image), fields(key = %key))]
    pub fn put(&self, key: CacheKey, image: ResolvedImage) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.images.get_mut(&key) {
            *existing = image;
            return;
        }

        if let Some(capacity) = self.capacity {
            while entries.images.len() >= capacity {
                let Some(oldest) = entries.insertion_order.pop_front() else {
                    break;
                };
                entries.images.remove(&oldest);
                tracing::debug!(evicted = %oldest, "Cache full, evicted oldest entry");
            }
        }

        entries.insertion_order.push_back(key.clone());
        entries.images.insert(key, image);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .images
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes the process-wide cache. Call once at startup, before the first lookup.
pub fn init(capacity: Option<usize>) -> anyhow::Result<Arc<QueryCache>> {
    let cache = Arc::new(match capacity {
        Some(capacity) => QueryCache::with_capacity(capacity),
        None => QueryCache::new(),
    });
    GLOBAL_CACHE
        .set(Arc::clone(&cache))
        .map_err(|_| anyhow::anyhow!("Cache already initialized"))?;
    Ok(cache)
}

/// Returns the process-wide cache, creating an unbounded one if `init` was never called.
pub fn global() -> Arc<QueryCache> {
    Arc::clone(GLOBAL_CACHE.get_or_init(|| Arc::new(QueryCache::new())))
}
