//! Type definitions shared by every layer
//!
//! - `locale` - The fixed set of supported locales
//! - `response` - API response wrappers and health checks

pub mod locale;
pub mod response;

pub use locale::{Locale, SUPPORTED_LOCALES};
pub use response::{ApiResponse, HealthResponse, HealthStatus};
