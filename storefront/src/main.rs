use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use storefront::handlers;
use storefront::services::subscriptions::{InMemorySubscriptionStore, SubscriptionStore};
use storefront_config::ServiceConfig;
use storefront_observability::{init_tracing, RequestLogger, TracingConfig};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize observability with structured logging
    init_tracing(TracingConfig::for_service("storefront-api"));

    // Load environment variables and service configuration
    let config = ServiceConfig::load();

    // Subscription store: in-memory, append-only, gone on restart. Injected
    // so tests (and a future real table) can swap it out.
    let store: Arc<dyn SubscriptionStore> = Arc::new(InMemorySubscriptionStore::new());
    let store_data = web::Data::from(store);

    tracing::info!("🛒 [Storefront API] Environment: {}", config.environment);
    tracing::info!("🚀 [Storefront API] Starting on port {}", config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .wrap(RequestLogger::for_service("storefront-api"))
            .route("/health", web::get().to(health_check))
            .configure(handlers::configure)
    })
    .bind(config.bind_addr())?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> actix_web::Result<web::Json<serde_json::Value>> {
    Ok(web::Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-api",
        "timestamp": chrono::Utc::now()
    })))
}
