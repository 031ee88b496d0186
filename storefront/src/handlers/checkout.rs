use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use storefront_models::checkout::{
    AmountBreakdown, CheckoutRequest, CheckoutResponse, LineItem, ProductSummary,
};

use crate::errors::ServiceError;
use crate::services::{payments, pricing, validation};

/// POST /api/checkout
///
/// Prices the order, runs the simulated payment step, and returns the full
/// breakdown. Nothing is persisted; repeating a request mints a fresh order
/// id every time.
pub async fn create_order(body: web::Bytes) -> Result<HttpResponse, ServiceError> {
    let request: CheckoutRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid JSON body"
            })));
        }
    };

    let valid = match validation::validate_checkout(&request) {
        Ok(valid) => valid,
        Err(errors) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "errors": errors,
                "message": "Validation failed"
            })));
        }
    };

    let state = request
        .address
        .as_ref()
        .and_then(|address| address.state.as_deref());
    let quote = pricing::price_order(
        valid.quantity,
        valid.shipping_method,
        request.coupon_code.as_deref(),
        state,
    );

    // Declined charges map to 402; the simulated processor never declines.
    let receipt = payments::process_test_charge(&valid.email, quote.total, request.payment.as_ref())?;

    let order_id = format!("ord_{}", Uuid::new_v4());

    let mut line_items = vec![LineItem {
        description: format!("{} x {}", valid.product.name, valid.quantity),
        amount: quote.subtotal,
    }];
    if quote.discount > Decimal::ZERO {
        line_items.push(LineItem {
            description: "Discount".to_string(),
            amount: -quote.discount,
        });
    }
    if quote.shipping > Decimal::ZERO {
        line_items.push(LineItem {
            description: format!("{} Shipping", valid.shipping_method.label()),
            amount: quote.shipping,
        });
    }
    if quote.tax > Decimal::ZERO {
        line_items.push(LineItem {
            description: "Estimated Tax".to_string(),
            amount: quote.tax,
        });
    }

    tracing::info!(
        order_id = %order_id,
        quantity = %valid.quantity,
        total = %quote.total,
        "checkout order priced"
    );

    Ok(HttpResponse::Ok().json(CheckoutResponse {
        success: true,
        order_id,
        email: valid.email,
        product: ProductSummary {
            id: valid.product.id.to_string(),
            name: valid.product.name.to_string(),
            unit_price: quote.unit_price,
        },
        quantity: valid.quantity,
        shipping_method: valid.shipping_method,
        coupon_code: request.coupon_code.as_ref().map(|code| code.to_uppercase()),
        amount: AmountBreakdown {
            currency: valid.product.currency,
            subtotal: quote.subtotal,
            discount: quote.discount,
            shipping: quote.shipping,
            tax: quote.tax,
            total: quote.total,
        },
        test_mode: receipt.test_mode,
        line_items,
        message: "Order processed successfully.".to_string(),
    }))
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({
        "success": false,
        "message": "Method Not Allowed"
    }))
}
