//! Content query gateway implementation

use std::sync::Arc;
use std::time::Duration;

use agro_shared::Locale;
use chrono::Utc;
use serde_json::Value;

use crate::domain::entities::ContentEntity;
use crate::errors::ContentStoreError;

use super::query::{ContentQuery, GroqQuery};
use super::traits::{CachedResponse, ContentStore, QueryCache};

/// Gateway between page code and the content store.
///
/// Validates store payloads into typed entities, applies the per-query
/// revalidation window through the optional cache, and turns transport
/// failures into empty results so one failing query only empties a section.
pub struct ContentGateway {
    /// Remote content store
    store: Arc<dyn ContentStore>,
    /// Shared response cache; without one every call hits the store
    cache: Option<Arc<dyn QueryCache>>,
    /// Revalidation interval for queries that do not set one
    default_revalidate: Duration,
}

impl ContentGateway {
    /// Create a new gateway
    ///
    /// # Arguments
    ///
    /// * `store` - Content store implementation
    /// * `default_revalidate_secs` - Revalidation interval applied when a
    ///   query does not carry its own
    pub fn new(store: Arc<dyn ContentStore>, default_revalidate_secs: u64) -> Self {
        Self {
            store,
            cache: None,
            default_revalidate: Duration::from_secs(default_revalidate_secs),
        }
    }

    /// Attach a response cache
    pub fn with_cache(mut self, cache: Arc<dyn QueryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Fetch a single entity.
    ///
    /// `None` means not found: no match, a payload failing validation, or a
    /// store failure. Callers cannot and need not tell these apart.
    pub async fn fetch_one<T: ContentEntity>(&self, query: &ContentQuery, locale: Locale) -> Option<T> {
        let groq = self.prepare::<T>(query, locale)?;
        let value = match self.execute(query, &groq).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    kind = %groq.kind,
                    locale = %locale,
                    error = %e,
                    event = "content_fetch_failed",
                    "Single-entity query failed, treating as not found"
                );
                return None;
            }
        };

        // A list payload for a single query means the store ignored the slice
        let value = match value {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            Value::Array(_) | Value::Null => return None,
            other => other,
        };

        match decode::<T>(value) {
            Ok(entity) => Some(entity),
            Err(reason) => {
                tracing::warn!(
                    kind = %groq.kind,
                    locale = %locale,
                    reason = %reason,
                    event = "content_invalid",
                    "Entity failed validation, treating as not found"
                );
                None
            }
        }
    }

    /// Fetch an ordered, bounded list.
    ///
    /// Invalid items are dropped. The query's ordering is re-applied locally
    /// with name and id tie-breaks, so the order is deterministic for a
    /// fixed data set. Store failures yield an empty list.
    pub async fn fetch_list<T: ContentEntity>(&self, query: &ContentQuery, locale: Locale) -> Vec<T> {
        let Some(groq) = self.prepare::<T>(query, locale) else {
            return Vec::new();
        };
        let items = match self.execute(query, &groq).await {
            Ok(Value::Array(items)) => items,
            Ok(Value::Null) => Vec::new(),
            Ok(other) => vec![other],
            Err(e) => {
                tracing::warn!(
                    kind = %groq.kind,
                    locale = %locale,
                    error = %e,
                    event = "content_fetch_failed",
                    "Listing query failed, degrading to empty list"
                );
                return Vec::new();
            }
        };

        let total = items.len();
        let mut entities: Vec<T> = items
            .into_iter()
            .filter_map(|item| match decode::<T>(item) {
                Ok(entity) => Some(entity),
                Err(reason) => {
                    tracing::debug!(kind = %groq.kind, reason = %reason, "Dropping invalid item");
                    None
                }
            })
            .collect();
        if entities.len() < total {
            tracing::warn!(
                kind = %groq.kind,
                locale = %locale,
                dropped = total - entities.len(),
                event = "content_items_dropped",
                "Listing contained items failing validation"
            );
        }

        entities.sort_by(|a, b| query.compare(a, b));
        if let Some(limit) = query.limit {
            entities.truncate(limit);
        }
        entities
    }

    /// Drop the cached response of a query
    pub async fn invalidate(&self, query: &ContentQuery, locale: Locale) -> Result<(), ContentStoreError> {
        match &self.cache {
            Some(cache) => cache.invalidate(&query.to_groq(locale).cache_key()).await,
            None => Ok(()),
        }
    }

    fn prepare<T: ContentEntity>(&self, query: &ContentQuery, locale: Locale) -> Option<GroqQuery> {
        if query.kind != T::KIND {
            tracing::error!(
                expected = %T::KIND,
                actual = %query.kind,
                "Query kind does not match the requested entity type"
            );
            return None;
        }
        Some(query.to_groq(locale))
    }

    fn revalidate_for(&self, query: &ContentQuery) -> Duration {
        query
            .revalidate
            .map(Duration::from_secs)
            .unwrap_or(self.default_revalidate)
    }

    /// Serve from cache while fresh, otherwise query the store and refill.
    /// Cache failures are logged and bypassed.
    async fn execute(&self, query: &ContentQuery, groq: &GroqQuery) -> Result<Value, ContentStoreError> {
        let revalidate = self.revalidate_for(query);
        let cache = match &self.cache {
            Some(cache) if !revalidate.is_zero() => cache,
            _ => return self.store.query(groq).await,
        };

        let key = groq.cache_key();
        match cache.get(&key).await {
            Ok(Some(cached)) if cached.is_fresh(revalidate, Utc::now()) => {
                tracing::debug!(key = %key, "Content cache hit");
                return Ok(cached.value);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Content cache read failed");
            }
        }

        let value = self.store.query(groq).await?;
        let response = CachedResponse::new(value);
        if let Err(e) = cache.put(&key, &response, revalidate).await {
            tracing::warn!(key = %key, error = %e, "Content cache write failed");
        }
        Ok(response.value)
    }
}

fn decode<T: ContentEntity>(value: Value) -> Result<T, String> {
    let entity: T = serde_json::from_value(value).map_err(|e| e.to_string())?;
    entity.validate()?;
    Ok(entity)
}
