//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or, env_parse, ConfigError};

/// Default revalidation interval for content queries (1 hour)
pub const DEFAULT_REVALIDATE_SECS: u64 = 3600;

/// Storage behind the content query cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Per-process map, lost on restart
    Memory,
    /// Redis, shared by every instance
    Redis,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            _ => Err(format!("Unknown cache backend: {}", s)),
        }
    }
}

/// Content query cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Which backend stores cached query responses
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Enable cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Revalidation interval applied when a query does not set its own
    #[serde(default = "default_revalidate")]
    pub default_revalidate_secs: u64,

    /// Upper bound on entries held by the in-memory backend
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            url: String::from("redis://localhost:6379"),
            key_prefix: Some(String::from("agro")),
            default_revalidate_secs: default_revalidate(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or("CACHE_BACKEND", "memory")
            .parse()
            .map_err(|reason| ConfigError::Invalid {
                key: "CACHE_BACKEND",
                reason,
            })?;

        Ok(Self {
            backend,
            url: env_or("REDIS_URL", "redis://localhost:6379"),
            key_prefix: env_opt("CACHE_KEY_PREFIX").or_else(|| Some(String::from("agro"))),
            default_revalidate_secs: env_parse(
                "CACHE_DEFAULT_REVALIDATE_SECS",
                DEFAULT_REVALIDATE_SECS,
            )?,
            max_entries: env_parse("CACHE_MAX_ENTRIES", default_max_entries())?,
        })
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_revalidate() -> u64 {
    DEFAULT_REVALIDATE_SECS
}

fn default_max_entries() -> usize {
    1000
}
