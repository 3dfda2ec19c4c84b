//! Kompi Browser API Server
//!
//! Main entry point for the Kompi browser service.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use kompi_browser::browser::Browser;
use kompi_browser::cache::EpisodeCache;
use kompi_browser::client::ApiClient;
use kompi_browser::config::Config;
use kompi_browser::routes::{configure_routes, ApiDoc, AppState};

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_address = config.bind_address();

    let client = ApiClient::with_config(config.client_config()).map_err(|e| {
        error!("Failed to create upstream client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    info!("Using content API at {}", client.base_url());

    let app_state = web::Data::new(AppState {
        browser: Browser::new(
            Arc::new(client),
            EpisodeCache::new(config.episode_cache_capacity),
        ),
    });

    info!("Starting Kompi browser server on {}", bind_address);

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/health", web::get().to(health_check))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
