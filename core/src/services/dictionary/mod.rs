//! Dictionary loading with per-locale registration and default fallback

mod loader;
mod traits;


pub use loader::DictionaryLoader;
pub use traits::DictionarySource;
