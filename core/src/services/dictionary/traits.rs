//! Trait for dictionary bundle sources

use agro_shared::Locale;
use async_trait::async_trait;

use crate::domain::Dictionary;
use crate::errors::DictionaryError;

/// Where a locale's translation bundle comes from (embedded, filesystem...)
#[async_trait]
pub trait DictionarySource: Send + Sync {
    async fn load(&self, locale: Locale) -> Result<Dictionary, DictionaryError>;

    /// Short description for logs
    fn describe(&self) -> String;
}
