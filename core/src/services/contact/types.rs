//! Types for contact form delivery

use serde::{Deserialize, Serialize};

/// A contact form submission that passed request validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    /// Product the inquiry is about
    pub product: Option<String>,
    pub message: String,
}

/// Structured outbound email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Proof of acceptance by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier
    pub id: String,
}

impl DeliveryReceipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
