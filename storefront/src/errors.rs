use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Service-layer failures that map straight to an HTTP response. Handler
/// rejections with endpoint-specific body shapes (validation lists, media
/// type, method) are built inline in the handlers instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
    #[error("Subscription store error: {0}")]
    Store(String),
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::PaymentDeclined(message) => {
                HttpResponse::PaymentRequired().json(serde_json::json!({
                    "success": false,
                    "message": message,
                }))
            }
            ServiceError::Store(message) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "success": false,
                    "error": message,
                }))
            }
        }
    }
}
