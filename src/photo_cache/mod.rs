//! PhotoCache - Time-Bounded Read Cache
//!
//! ## Responsibilities
//!
//! - Key-addressed cache in front of the document store
//! - Per-entry TTL class recorded at set time (general 5 min, photo 60 min)
//! - Lazy expiry at read; expired entries stay until the next set overwrites
//! - Explicit invalidation for the marker/camera linker
//!
//! The cache is advisory: a miss or an expired entry always falls
//! through to the store, never to another cache layer.

use crate::store::{Camera, Photo};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Cached recent-photo lookups, keyed by camera id
pub type RecentPhotoCache = TtlCache<Photo>;

/// Cached marker->camera lookups, keyed by marker id
pub type MarkerCameraCache = TtlCache<Camera>;

/// TTL class chosen per entry when it is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlClass {
    /// Short-lived entries (marker and directory lookups)
    General,
    /// Photo entries; vendor media URLs stay valid much longer
    Photo,
}

/// Configured TTL durations per class
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    pub general: Duration,
    pub photo: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            general: Duration::from_secs(300),
            photo: Duration::from_secs(3600),
        }
    }
}

impl TtlPolicy {
    pub fn ttl(&self, class: TtlClass) -> Duration {
        match class {
            TtlClass::General => self.general,
            TtlClass::Photo => self.photo,
        }
    }
}

/// Cached value; the TTL travels with the entry
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// Typed, key-addressed TTL cache
pub struct TtlCache<T> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
    policy: TtlPolicy,
}

impl<T: Clone> TtlCache<T> {
    /// Create new cache with the given TTL policy
    pub fn new(policy: TtlPolicy) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            policy,
        }
    }

    /// Create with default TTLs (general 5 min, photo 60 min)
    pub fn with_defaults() -> Self {
        Self::new(TtlPolicy::default())
    }

    /// Get a fresh value. Expired entries are not removed; the next
    /// set overwrites them.
    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.is_fresh(Instant::now()) => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Store a value under the TTL class chosen for this entry
    pub async fn set(&self, key: &str, value: T, class: TtlClass) {
        let entry = CacheEntry {
            value,
            stored_at: Instant::now(),
            ttl: self.policy.ttl(class),
        };
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), entry);
    }

    /// Drop an entry immediately (linker invalidation path)
    pub async fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_some() {
            tracing::debug!(key = %key, "Cache entry invalidated");
        }
    }
}
