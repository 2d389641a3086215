//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{ContentStoreError, DictionaryError, EmailError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Illegal render transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Content(#[from] ContentStoreError),

    #[error(transparent)]
    Email(#[from] EmailError),
}

impl DomainError {
    /// Whether the error means the deployment is misconfigured rather than
    /// that one request went wrong
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::Dictionary(DictionaryError::DefaultUnavailable { .. }))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
