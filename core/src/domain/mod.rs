//! Domain layer: content entities read from the CMS and the translation dictionary.

pub mod dictionary;
pub mod entities;

// Re-export commonly used domain types
pub use dictionary::Dictionary;
pub use entities::*;
