//! Content entities projected from the headless CMS.
//!
//! Every entity is deserialized from an explicit query projection and then
//! validated at the gateway boundary, so page code works against fixed
//! structs instead of raw JSON.

pub mod article;
pub mod category;
pub mod kind;
pub mod media;
pub mod product;


// Re-export commonly used types
pub use article::Article;
pub use category::Category;
pub use kind::{ContentEntity, EntityKind};
pub use media::{CategoryRef, ImageRef};
pub use product::{Product, Specification};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default.
///
/// GROQ projections yield `null` for absent fields, which serde's `default`
/// alone does not cover.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
