use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use storefront_models::subscribe::{
    SubscribePayload, SubscribeResponse, Subscription, SubscriptionStatus,
};
use storefront_models::Currency;

use crate::errors::ServiceError;
use crate::services::subscriptions::{self, SubscriptionStore};
use crate::services::{catalog, pricing, validation};

/// POST /api/subscribe
///
/// Creates a subscription record and appends it to the injected store. The
/// store is best-effort: an append failure is logged and the caller still
/// gets their confirmation.
pub async fn create_subscription(
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<dyn SubscriptionStore>,
) -> Result<HttpResponse, ServiceError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if !content_type.to_ascii_lowercase().contains("application/json") {
        return Ok(HttpResponse::UnsupportedMediaType().json(json!({
            "success": false,
            "error": "Unsupported Media Type. Expected application/json"
        })));
    }

    let payload: SubscribePayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "error": "Invalid JSON body"
            })));
        }
    };

    let email = match payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| validation::is_valid_email(email))
    {
        Some(email) => email.to_string(),
        None => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "error": "A valid email address is required.",
                "details": { "field": "email" }
            })));
        }
    };

    let plan = catalog::plan(payload.plan_id.as_deref());
    let quantity = subscriptions::clamp_quantity(payload.quantity.as_ref());
    let subtotal = pricing::round2(plan.price * Decimal::from(quantity));
    let (total, discount) = subscriptions::apply_coupon(subtotal, payload.coupon.as_deref());

    let now = Utc::now();
    let subscription = Subscription {
        id: format!("sub_{}", Uuid::new_v4()),
        status: SubscriptionStatus::Active,
        email,
        name: payload.name.as_deref().map(|name| name.trim().to_string()),
        plan_id: plan.id.to_string(),
        interval: plan.interval,
        quantity,
        unit_price: plan.price,
        discount,
        total: pricing::round2(total),
        currency: Currency::Usd,
        created_at: now,
        next_billing_date: subscriptions::next_billing_date(plan.interval, now),
        address: payload.address.clone(),
        meta: payload.meta.filter(|meta| meta.is_object()),
    };

    if let Err(err) = store.append(subscription.clone()) {
        tracing::warn!(error = %err, subscription_id = %subscription.id, "failed to record subscription; continuing");
    }

    tracing::info!(
        subscription_id = %subscription.id,
        plan_id = %subscription.plan_id,
        quantity = subscription.quantity,
        total = %subscription.total,
        "subscription created"
    );

    Ok(HttpResponse::Created().json(SubscribeResponse {
        success: true,
        subscription_id: subscription.id.clone(),
        subscription,
        message: "Subscription created successfully.".to_string(),
    }))
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({
        "success": false,
        "error": "Method Not Allowed"
    }))
}
