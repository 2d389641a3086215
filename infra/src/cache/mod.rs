//! Cache module for query response caching
//!
//! Store responses are cached under the query's cache key. Freshness is
//! judged by the gateway from `fetched_at`; the backends only evict.

pub mod memory_cache;
pub mod redis_cache;
pub mod redis_client;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use agro_core::QueryCache;
use agro_shared::{CacheBackend, CacheConfig};

pub use memory_cache::MemoryQueryCache;
pub use redis_cache::RedisQueryCache;
pub use redis_client::{RedisClient, RetryPolicy};

use crate::InfrastructureError;

/// Create the query cache selected by configuration
pub async fn create_query_cache(config: &CacheConfig) -> Result<Arc<dyn QueryCache>, InfrastructureError> {
    match config.backend {
        CacheBackend::Memory => {
            tracing::info!(max_entries = config.max_entries, "Using in-memory query cache");
            Ok(Arc::new(MemoryQueryCache::new(config.max_entries)))
        }
        CacheBackend::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            Ok(Arc::new(RedisQueryCache::new(client)))
        }
    }
}
