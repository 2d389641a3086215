//! HTTP layer of the Agro Export site
//!
//! Serves the localized page tree under `/{locale}`, the JSON contact and
//! health endpoints under `/api`, and redirects locale-less paths to their
//! negotiated locale.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use state::AppState;
