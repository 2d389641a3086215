//! Redis connection used by the shared query cache
//!
//! One multiplexed connection per process. Connecting and every command go
//! through the same exponential backoff, applied only to transient errors.

use std::future::Future;
use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, ErrorKind, RedisError, RedisResult};
use tokio::time::sleep;

use agro_shared::CacheConfig;

use crate::InfrastructureError;

/// Backoff applied to connection attempts and commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    async fn run<T, F, Fut>(&self, what: &'static str, mut op: F) -> RedisResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && is_retriable_error(&e) => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        operation = what,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Redis call failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
    retry: RetryPolicy,
}

impl RedisClient {
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::with_retry_policy(config, RetryPolicy::default()).await
    }

    pub async fn with_retry_policy(
        config: CacheConfig,
        retry: RetryPolicy,
    ) -> Result<Self, InfrastructureError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| InfrastructureError::Config(format!("Invalid Redis URL: {}", e)))?;

        let connection = retry
            .run("connect", || client.get_multiplexed_async_connection())
            .await
            .map_err(|e| {
                tracing::error!(url = %mask_url(&config.url), error = %e, "Could not connect to Redis");
                InfrastructureError::Cache(e)
            })?;

        tracing::info!(
            url = %mask_url(&config.url),
            prefix = config.key_prefix.as_deref().unwrap_or(""),
            "Connected to Redis query cache"
        );

        Ok(Self {
            connection,
            config,
            retry,
        })
    }

    /// Key with the configured namespace prefix
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// Store `value`, expiring after `ttl` (at least one second)
    pub async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), InfrastructureError> {
        let key = self.key(key);
        let seconds = ttl.as_secs().max(1);
        self.retry
            .run("set", || {
                let mut conn = self.connection.clone();
                let key = key.clone();
                async move { conn.set_ex::<_, _, ()>(key, value, seconds).await }
            })
            .await
            .map_err(InfrastructureError::Cache)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = self.key(key);
        self.retry
            .run("get", || {
                let mut conn = self.connection.clone();
                let key = key.clone();
                async move { conn.get::<_, Option<String>>(key).await }
            })
            .await
            .map_err(InfrastructureError::Cache)
    }

    /// Remove a key; true when it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = self.key(key);
        let removed = self
            .retry
            .run("del", || {
                let mut conn = self.connection.clone();
                let key = key.clone();
                async move { conn.del::<_, u32>(key).await }
            })
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok(removed > 0)
    }

    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let reply = self
            .retry
            .run("ping", || {
                let mut conn = self.connection.clone();
                async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await }
            })
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok(reply == "PONG")
    }
}

/// Connection drops and server warm-up are worth another attempt
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        ErrorKind::IoError | ErrorKind::BusyLoadingError | ErrorKind::TryAgain
    )
}

/// Replace credentials in a Redis URL for logs
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}
