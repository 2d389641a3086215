//! Traits for content store and query cache integration

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ContentStoreError;

use super::query::GroqQuery;

/// Trait for the remote content store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Run a query and return its `result` payload (`null` when a single
    /// lookup matched nothing)
    async fn query(&self, query: &GroqQuery) -> Result<Value, ContentStoreError>;

    /// Short name for logs and health output
    fn name(&self) -> &str;
}

/// A store response as kept in the query cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub value: Value,
    pub fetched_at: DateTime<Utc>,
}

impl CachedResponse {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            fetched_at: Utc::now(),
        }
    }

    /// Whether the response is still within the revalidation interval
    pub fn is_fresh(&self, revalidate: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(revalidate) {
            Ok(window) => now < self.fetched_at + window,
            Err(_) => true,
        }
    }
}

/// Trait for the shared query response cache
#[async_trait]
pub trait QueryCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>, ContentStoreError>;

    /// Store a response; backends may evict it after `ttl`
    async fn put(
        &self,
        key: &str,
        response: &CachedResponse,
        ttl: Duration,
    ) -> Result<(), ContentStoreError>;

    async fn invalidate(&self, key: &str) -> Result<(), ContentStoreError>;

    /// Whether the backend answers; in-process caches always do
    async fn health_check(&self) -> bool {
        true
    }
}
