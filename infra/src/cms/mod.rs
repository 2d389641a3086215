//! CMS Module
//!
//! Content store clients. The only backend is the Sanity HTTP query API;
//! tests substitute a `wiremock` server through `SANITY_API_HOST`.

pub mod sanity_client;

pub use sanity_client::SanityClient;

#[cfg(test)]
mod tests;
