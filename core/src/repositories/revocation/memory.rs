//! In-memory implementation of RevocationStore for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::services::clock::{Clock, SystemClock};

use super::trait_::RevocationStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<i64>,
}

/// In-memory key-value store with clock-driven TTLs
///
/// Expired entries are treated as absent and swept lazily on write.
pub struct InMemoryRevocationStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
    unavailable: AtomicBool,
    latency: Option<Duration>,
}

impl InMemoryRevocationStore {
    /// Create a store driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store whose TTLs are evaluated against `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
            unavailable: AtomicBool::new(false),
            latency: None,
        }
    }

    /// Delay every operation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every operation fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| is_live(e, now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Value stored under `key`, if live
    pub async fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|e| is_live(e, now))
            .map(|e| e.value.clone())
    }

    /// Remaining TTL of `key` in seconds; `Some(None)` for a record without expiry
    pub async fn ttl(&self, key: &str) -> Option<Option<i64>> {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|e| is_live(e, now))
            .map(|e| e.expires_at.map(|at| at - now))
    }

    async fn simulate(&self) -> Result<(), StoreError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store marked unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn is_live(entry: &Entry, now: i64) -> bool {
    entry.expires_at.map_or(true, |at| now < at)
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.simulate().await?;
        let now = self.clock.now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .map_or(false, |e| is_live(e, now)))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        self.simulate().await?;
        let now = self.clock.now();
        let expires_at = ttl.map(|ttl| {
            let secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
            now.saturating_add(secs)
        });

        let mut entries = self.entries.write().await;
        entries.retain(|_, e| is_live(e, now));
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.simulate().await
    }
}
