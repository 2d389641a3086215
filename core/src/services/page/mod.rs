//! Page composition module
//!
//! This module turns a resolved locale and a template into a response:
//! - `template` - Which page is being served
//! - `state` - Per-request render state machine
//! - `content` - Entities fetched for the page
//! - `document` and `render` - Page model and its HTML serialization
//! - `composer` - Not-found short-circuit and section assembly
//! - `service` - Concurrent fetching followed by composition

mod composer;
mod content;
mod document;
mod render;
mod service;
mod state;
mod template;


pub use composer::{PageComposer, PageOutcome, RenderedPage};
pub use content::PageContent;
pub use document::{Card, FieldKind, FormField, Link, PageDocument, Section};
pub use render::HtmlRenderer;
pub use service::PageService;
pub use state::{RenderLifecycle, RenderState};
pub use template::PageTemplate;
