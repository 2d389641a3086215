//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Query cache backend and revalidation defaults
//! - `content` - Headless CMS (content store) connection
//! - `email` - Outbound email transport for the contact form
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server bind address and public site identity
//!
//! Every section is loaded from environment variables. Missing required
//! settings surface as [`ConfigError`] and are fatal at startup.

pub mod cache;
pub mod content;
pub mod email;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use cache::{CacheBackend, CacheConfig};
pub use content::ContentStoreConfig;
pub use email::{EmailConfig, EmailProvider, SmtpSettings};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{ServerConfig, SiteConfig};

/// Errors raised while reading configuration
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    /// An environment variable is set but cannot be used
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Public site identity
    pub site: SiteConfig,

    /// Content store configuration
    pub content: ContentStoreConfig,

    /// Query cache configuration
    pub cache: CacheConfig,

    /// Email transport configuration
    pub email: EmailConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Directory overriding the embedded dictionary bundles
    #[serde(default)]
    pub dictionary_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            site: SiteConfig::from_env(),
            content: ContentStoreConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            email: EmailConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
            dictionary_dir: env_opt("DICTIONARY_DIR").map(PathBuf::from),
        })
    }
}

/// Read an optional variable, treating blank values as unset
pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable or fall back to a default
pub(crate) fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Read a required variable
pub(crate) fn env_required(key: &'static str) -> Result<String, ConfigError> {
    env_opt(key).ok_or(ConfigError::Missing(key))
}

/// Parse a variable, falling back to a default when unset
pub(crate) fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("'{}': {}", raw, e),
        }),
        None => Ok(default),
    }
}

/// Parse a boolean flag ("true"/"1"/"yes" and "false"/"0"/"no")
pub(crate) fn env_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env_opt(key) {
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key,
                reason: format!("'{}' is not a boolean", raw),
            }),
        },
        None => Ok(default),
    }
}
