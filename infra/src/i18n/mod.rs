//! Dictionary sources
//!
//! Bundles ship inside the binary (`dictionaries/*.json`). A directory set
//! with `DICTIONARY_DIR` overrides them per locale; locales missing from the
//! directory keep the embedded bundle.

pub mod embedded;
pub mod file_source;


use std::path::Path;
use std::sync::Arc;

use agro_core::{DictionaryLoader, DictionarySource};

pub use embedded::EmbeddedDictionarySource;
pub use file_source::FileDictionarySource;

/// Build the dictionary loader for every supported locale
pub fn create_dictionary_loader(dictionary_dir: Option<&Path>) -> DictionaryLoader {
    let source: Arc<dyn DictionarySource> = match dictionary_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Loading dictionaries from directory");
            Arc::new(FileDictionarySource::new(dir).with_fallback(EmbeddedDictionarySource))
        }
        None => Arc::new(EmbeddedDictionarySource),
    };
    DictionaryLoader::new(source.clone()).register_all(source)
}
