use actix_web::web;

use storefront_middleware::{CorsConfig, CorsMiddleware};

pub mod checkout;
pub mod subscribe;

/// Mount both API routes, each behind its own CORS personality: checkout is
/// served to any page with a wildcard origin, subscribe reflects the caller's
/// origin and caches preflights for a day. The catch-all route on each
/// resource turns unsupported methods into a 405 instead of a 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/checkout")
            .wrap(CorsMiddleware::new(CorsConfig::public_wildcard()))
            .service(
                web::resource("")
                    .route(web::post().to(checkout::create_order))
                    .route(web::route().to(checkout::method_not_allowed)),
            ),
    )
    .service(
        web::scope("/api/subscribe")
            .wrap(CorsMiddleware::new(CorsConfig::reflect_origin()))
            .service(
                web::resource("")
                    .route(web::post().to(subscribe::create_subscription))
                    .route(web::route().to(subscribe::method_not_allowed)),
            ),
    );
}
