//! Dictionary bundles read from `{dir}/{locale}.json`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use agro_core::{Dictionary, DictionaryError, DictionarySource};
use agro_shared::Locale;
use async_trait::async_trait;

use super::EmbeddedDictionarySource;

#[derive(Debug, Clone)]
pub struct FileDictionarySource {
    dir: PathBuf,
    fallback: Option<EmbeddedDictionarySource>,
}

impl FileDictionarySource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            fallback: None,
        }
    }

    /// Use the embedded bundle when the directory has no file for a locale
    pub fn with_fallback(mut self, fallback: EmbeddedDictionarySource) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn path_for(&self, locale: Locale) -> PathBuf {
        self.dir.join(format!("{}.json", locale.code()))
    }
}

#[async_trait]
impl DictionarySource for FileDictionarySource {
    async fn load(&self, locale: Locale) -> Result<Dictionary, DictionaryError> {
        let path = self.path_for(locale);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Dictionary::from_json_str(locale.code(), &raw),
            Err(e) if e.kind() == ErrorKind::NotFound => match &self.fallback {
                Some(fallback) => {
                    tracing::debug!(
                        locale = %locale,
                        path = %path.display(),
                        "No dictionary file, using embedded bundle"
                    );
                    fallback.load(locale).await
                }
                None => Err(DictionaryError::NotFound {
                    locale: locale.code().to_string(),
                }),
            },
            Err(e) => Err(DictionaryError::Io {
                locale: locale.code().to_string(),
                reason: format!("{}: {}", path.display(), e),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.dir.display())
    }
}
