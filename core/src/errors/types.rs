//! Error types for the outbound collaborators of the domain
//!
//! Each collaborator (content store, dictionary sources, email transports)
//! reports failures with its own enum so callers can decide per source
//! whether a failure degrades the page or aborts the request.

use thiserror::Error;

/// Content store and query cache failures
///
/// The content gateway never lets these reach a page: listings degrade to
/// empty and single lookups to not-found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentStoreError {
    #[error("Content store unreachable: {message}")]
    Transport { message: String },

    #[error("Content store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed content store response: {message}")]
    Decode { message: String },

    #[error("Query cache failure: {message}")]
    Cache { message: String },
}

/// Dictionary loading failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("No dictionary bundle for locale '{locale}'")]
    NotFound { locale: String },

    #[error("Dictionary bundle for '{locale}' is malformed: {reason}")]
    Malformed { locale: String, reason: String },

    #[error("Dictionary bundle for '{locale}' could not be read: {reason}")]
    Io { locale: String, reason: String },

    /// The default bundle failed; pages cannot render without text
    #[error("Default dictionary '{locale}' unavailable: {reason}")]
    DefaultUnavailable { locale: String, reason: String },
}

/// Outbound email failures, surfaced to the submitter without retry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email provider {provider} unreachable: {reason}")]
    Transport { provider: String, reason: String },

    #[error("Email provider {provider} rejected the message ({status}): {reason}")]
    Rejected {
        provider: String,
        status: u16,
        reason: String,
    },

    #[error("Email message is invalid: {reason}")]
    InvalidMessage { reason: String },
}

impl EmailError {
    /// Human-readable reason without the provider prefix
    pub fn reason(&self) -> &str {
        match self {
            EmailError::Transport { reason, .. }
            | EmailError::Rejected { reason, .. }
            | EmailError::InvalidMessage { reason } => reason,
        }
    }
}
