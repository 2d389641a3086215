//! # Agro Export Core
//!
//! Domain layer of the Agro Export site. It holds the content entities read
//! from the CMS, locale negotiation and path rewriting, and the services that
//! turn a request into a rendered page: the dictionary loader, the content
//! query gateway, the page composer and the contact service.
//!
//! Outbound collaborators (content store, query cache, dictionary sources,
//! email transports) are traits here and implemented in the infra crate.

pub mod domain;
pub mod errors;
pub mod i18n;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{entities::*, Dictionary};
pub use errors::*;
pub use i18n::*;
pub use services::*;
