//! Content query gateway module
//!
//! This module turns typed query descriptors into content store queries:
//! - `query` - Descriptors, filters, ordering and GROQ serialization
//! - `traits` - Content store and query cache seams
//! - `gateway` - Validation, caching and failure degradation

mod gateway;
mod query;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use gateway::ContentGateway;
pub use query::{ContentQuery, Direction, Filter, GroqQuery, OrderBy, OrderKey};
pub use traits::{CachedResponse, ContentStore, QueryCache};
