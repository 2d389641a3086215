//! Trait for outbound email transports

use async_trait::async_trait;

use crate::errors::EmailError;

use super::types::{DeliveryReceipt, EmailMessage};

/// Trait for email transport integration
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Attempt delivery once
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, EmailError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}
