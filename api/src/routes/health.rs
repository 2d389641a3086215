use actix_web::{web, HttpResponse};
use agro_shared::HealthResponse;

use crate::state::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let mut response = HealthResponse::healthy("agro-site", env!("CARGO_PKG_VERSION"));
    for (name, detail) in &state.components {
        response = response.with_component(name.clone(), detail.clone());
    }
    // Cache misses fall through to the content store, so pages keep working
    if let Some(cache) = &state.query_cache {
        if !cache.health_check().await {
            tracing::warn!(event = "cache_unreachable", "Health check found the query cache unreachable");
            response = response.degraded("cache", "unreachable");
        }
    }
    HttpResponse::Ok().json(response)
}
