//! Contact form delivery
//!
//! Builds an email from a validated submission and hands it to the
//! configured transport. Failures are returned to the caller; there is no
//! retry.

mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::{ContactService, ContactServiceConfig};
pub use traits::EmailTransport;
pub use types::{ContactSubmission, DeliveryReceipt, EmailMessage};
