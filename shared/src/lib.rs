//! Shared utilities and common types for the Agro Export site
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The supported locale set
//! - Error and API response structures
//! - Small text utilities (HTML escaping, slug validation)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, ConfigError, ContentStoreConfig, EmailConfig,
    EmailProvider, Environment, LogFormat, LoggingConfig, ServerConfig, SiteConfig, SmtpSettings,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, Locale, SUPPORTED_LOCALES};
pub use utils::{html, validation};
