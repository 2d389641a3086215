//! In-process query cache
//!
//! Bounded map of cache key to response. Expired entries are dropped on
//! read; when full, expired entries go first and then the oldest fetch.

use std::collections::HashMap;
use std::time::Duration;

use agro_core::{CachedResponse, ContentStoreError, QueryCache};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

struct Entry {
    response: CachedResponse,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Query cache held in process memory
pub struct MemoryQueryCache {
    entries: Mutex<HashMap<String, Entry>>,
    max_entries: usize,
}

impl MemoryQueryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    fn make_room(entries: &mut HashMap<String, Entry>, max_entries: usize, now: DateTime<Utc>) {
        if entries.len() < max_entries {
            return;
        }
        entries.retain(|_, entry| !entry.is_expired(now));
        while entries.len() >= max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.response.fetched_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

#[async_trait]
impl QueryCache for MemoryQueryCache {
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>, ContentStoreError> {
        let mut entries = self.entries.lock().await;
        let now = Utc::now();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.response.clone())),
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &str,
        response: &CachedResponse,
        ttl: Duration,
    ) -> Result<(), ContentStoreError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| ContentStoreError::Cache {
            message: format!("invalid ttl: {}", e),
        })?;
        let now = Utc::now();
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            Self::make_room(&mut entries, self.max_entries, now);
        }
        entries.insert(
            key.to_string(),
            Entry {
                response: response.clone(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), ContentStoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
