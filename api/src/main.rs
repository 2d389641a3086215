use actix_web::{web, HttpServer};
use anyhow::Context;

use agro_api::{create_app, telemetry, AppState};
use agro_shared::{AppConfig, EmailProvider};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        site = %config.site.url,
        "Starting Agro Export site"
    );

    if config.environment.is_production() && config.email.provider == EmailProvider::Mock {
        tracing::warn!("EMAIL_PROVIDER is mock in production; contact submissions will not be delivered");
    }

    let infra = agro_infra::initialize(&config)
        .await
        .context("Failed to initialize infrastructure")?;
    let state = web::Data::new(AppState::from_infrastructure(&config, &infra));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server listening");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
