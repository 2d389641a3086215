//! Dictionary bundles compiled into the binary

use agro_core::{Dictionary, DictionaryError, DictionarySource};
use agro_shared::Locale;
use async_trait::async_trait;

const EN: &str = include_str!("../../dictionaries/en.json");
const ID: &str = include_str!("../../dictionaries/id.json");

/// Raw JSON of the embedded bundle for a locale
pub fn bundle(locale: Locale) -> &'static str {
    match locale {
        Locale::English => EN,
        Locale::Indonesian => ID,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDictionarySource;

#[async_trait]
impl DictionarySource for EmbeddedDictionarySource {
    async fn load(&self, locale: Locale) -> Result<Dictionary, DictionaryError> {
        Dictionary::from_json_str(locale.code(), bundle(locale))
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}
