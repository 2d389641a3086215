//! Dictionary loader implementation

use std::collections::HashMap;
use std::sync::Arc;

use agro_shared::Locale;
use tokio::sync::OnceCell;

use crate::domain::Dictionary;
use crate::errors::DictionaryError;

use super::traits::DictionarySource;

struct Registration {
    source: Arc<dyn DictionarySource>,
    loaded: OnceCell<Arc<Dictionary>>,
}

impl Registration {
    fn new(source: Arc<dyn DictionarySource>) -> Self {
        Self {
            source,
            loaded: OnceCell::new(),
        }
    }
}

/// Resolves a locale to its dictionary.
///
/// Each locale has at most one registered source and the default locale
/// always has one. Bundles load once and are shared afterwards. A locale
/// without a source, or whose source fails, gets the default bundle. Other
/// bundles are merged over the default so every default key resolves.
pub struct DictionaryLoader {
    registrations: HashMap<Locale, Registration>,
}

impl DictionaryLoader {
    /// Create a loader with the source for the default locale
    pub fn new(default_source: Arc<dyn DictionarySource>) -> Self {
        let mut registrations = HashMap::new();
        registrations.insert(Locale::DEFAULT, Registration::new(default_source));
        Self { registrations }
    }

    /// Register the source for a locale, replacing any earlier one
    pub fn register(mut self, locale: Locale, source: Arc<dyn DictionarySource>) -> Self {
        self.registrations.insert(locale, Registration::new(source));
        self
    }

    /// Register one source for every supported locale
    pub fn register_all(mut self, source: Arc<dyn DictionarySource>) -> Self {
        for locale in Locale::all() {
            self.registrations
                .insert(*locale, Registration::new(source.clone()));
        }
        self
    }

    pub fn is_registered(&self, locale: Locale) -> bool {
        self.registrations.contains_key(&locale)
    }

    /// Dictionary for a locale.
    ///
    /// Fails only when the default bundle cannot be loaded; that is a
    /// configuration error and is not retried here.
    pub async fn load(&self, locale: Locale) -> Result<Arc<Dictionary>, DictionaryError> {
        let default = self.load_default().await?;
        if locale == Locale::DEFAULT {
            return Ok(default);
        }

        let Some(registration) = self.registrations.get(&locale) else {
            tracing::warn!(
                locale = %locale,
                event = "dictionary_fallback",
                "No dictionary registered for locale, using default"
            );
            return Ok(default);
        };

        let dictionary = registration
            .loaded
            .get_or_try_init(|| async {
                match registration.source.load(locale).await {
                    Ok(dictionary) => {
                        let missing = dictionary.missing_keys(&default);
                        if !missing.is_empty() {
                            tracing::debug!(
                                locale = %locale,
                                missing = missing.len(),
                                "Dictionary falls back to default text for some keys"
                            );
                        }
                        Ok::<_, DictionaryError>(Arc::new(dictionary.with_fallback(&default)))
                    }
                    Err(e) => {
                        tracing::warn!(
                            locale = %locale,
                            source = %registration.source.describe(),
                            error = %e,
                            event = "dictionary_fallback",
                            "Dictionary failed to load, using default"
                        );
                        Ok(default.clone())
                    }
                }
            })
            .await?;
        Ok(dictionary.clone())
    }

    async fn load_default(&self) -> Result<Arc<Dictionary>, DictionaryError> {
        let registration = self
            .registrations
            .get(&Locale::DEFAULT)
            .ok_or_else(|| DictionaryError::DefaultUnavailable {
                locale: Locale::DEFAULT.code().to_string(),
                reason: "no source registered".to_string(),
            })?;

        let dictionary = registration
            .loaded
            .get_or_try_init(|| async {
                let dictionary = registration.source.load(Locale::DEFAULT).await.map_err(|e| {
                    tracing::error!(
                        locale = %Locale::DEFAULT,
                        source = %registration.source.describe(),
                        error = %e,
                        event = "dictionary_default_failed",
                        "Default dictionary failed to load"
                    );
                    DictionaryError::DefaultUnavailable {
                        locale: Locale::DEFAULT.code().to_string(),
                        reason: e.to_string(),
                    }
                })?;
                if dictionary.is_empty() {
                    return Err(DictionaryError::DefaultUnavailable {
                        locale: Locale::DEFAULT.code().to_string(),
                        reason: "bundle is empty".to_string(),
                    });
                }
                Ok(Arc::new(dictionary))
            })
            .await?;
        Ok(dictionary.clone())
    }

    /// Load every registered bundle so configuration errors surface at startup
    pub async fn preload(&self) -> Result<(), DictionaryError> {
        for locale in Locale::all() {
            self.load(*locale).await?;
        }
        tracing::info!(
            locales = self.registrations.len(),
            "Dictionaries loaded"
        );
        Ok(())
    }
}
