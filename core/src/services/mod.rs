//! Business services containing domain logic and use cases.

pub mod contact;
pub mod content;
pub mod dictionary;
pub mod page;

// Re-export commonly used types
pub use contact::{
    ContactService, ContactServiceConfig, ContactSubmission, DeliveryReceipt, EmailMessage,
    EmailTransport,
};
pub use content::{
    CachedResponse, ContentGateway, ContentQuery, ContentStore, Direction, Filter, GroqQuery,
    OrderBy, OrderKey, QueryCache,
};
pub use dictionary::{DictionaryLoader, DictionarySource};
pub use page::{
    PageComposer, PageContent, PageOutcome, PageService, PageTemplate, RenderLifecycle,
    RenderState, RenderedPage,
};
