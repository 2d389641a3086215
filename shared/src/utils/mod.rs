//! Common utility functions

pub mod html;
pub mod validation;

pub use html::escape_html;
pub use validation::{is_valid_slug, non_empty_trimmed};
