//! Redis-backed query cache shared between instances

use std::time::Duration;

use agro_core::{CachedResponse, ContentStoreError, QueryCache};
use async_trait::async_trait;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Query cache storing JSON-encoded responses in Redis
#[derive(Clone)]
pub struct RedisQueryCache {
    client: RedisClient,
}

impl RedisQueryCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

fn cache_error(e: InfrastructureError) -> ContentStoreError {
    ContentStoreError::Cache {
        message: e.to_string(),
    }
}

#[async_trait]
impl QueryCache for RedisQueryCache {
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>, ContentStoreError> {
        let Some(raw) = self.client.get(key).await.map_err(cache_error)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(response) => Ok(Some(response)),
            Err(e) => {
                // An undecodable entry is treated as a miss and overwritten
                tracing::warn!(key, error = %e, "Discarding unreadable cache entry");
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        key: &str,
        response: &CachedResponse,
        ttl: Duration,
    ) -> Result<(), ContentStoreError> {
        let raw = serde_json::to_string(response)
            .map_err(|e| cache_error(InfrastructureError::Serialization(e)))?;
        self.client
            .set_with_expiry(key, &raw, ttl)
            .await
            .map_err(cache_error)
    }

    async fn invalidate(&self, key: &str) -> Result<(), ContentStoreError> {
        self.client.delete(key).await.map(|_| ()).map_err(cache_error)
    }

    async fn health_check(&self) -> bool {
        match self.client.health_check().await {
            Ok(answered) => answered,
            Err(e) => {
                tracing::warn!(error = %e, "Redis health check failed");
                false
            }
        }
    }
}
