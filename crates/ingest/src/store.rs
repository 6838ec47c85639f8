//! Capacity- and TTL-bounded session store.
//!
//! Sessions are written once after a batch completes and only read
//! afterwards, so the store needs nothing beyond a thread-safe get/insert
//! with bounded growth. Eviction reclaims memory for abandoned sessions.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;
use uuid::Uuid;

use crate::session::Session;

/// Store sizing and eviction policy.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum live sessions before LRU eviction kicks in.
    pub max_sessions: u64,
    /// How long an untouched session stays retrievable.
    pub ttl: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_sessions: 256,
            ttl: Duration::from_secs(60 * 60),
        }
    }
}

/// Keyed store of immutable sessions.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<Uuid, Arc<Session>>,
}

impl SessionStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(config.max_sessions)
                .time_to_live(config.ttl)
                .build(),
        }
    }

    /// Stores a sealed session and returns its opaque identifier.
    pub fn insert(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        debug!(session = %id, games = session.catalog().len(), "storing session");
        self.cache.insert(id, Arc::new(session));
        id
    }

    /// Looks up a session by identifier. `None` after eviction or expiry.
    pub fn get(&self, id: &Uuid) -> Option<Arc<Session>> {
        self.cache.get(id)
    }

    /// Drops a session explicitly.
    pub fn remove(&self, id: &Uuid) {
        self.cache.invalidate(id);
    }

    /// Flushes pending eviction work and reports the live session count.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
