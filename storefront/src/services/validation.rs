//! Checkout request validation. All rules are checked and every failure is
//! reported; nothing short-circuits on the first bad field.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use storefront_models::checkout::CheckoutRequest;
use storefront_models::ShippingMethod;

use super::catalog::{self, Product};

// Permissive on purpose: one @, no whitespace, a dot somewhere in the domain.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A checkout request that passed validation, with everything the pricing
/// engine needs resolved to concrete values.
#[derive(Debug, Clone)]
pub struct ValidCheckout {
    pub product: &'static Product,
    pub quantity: Decimal,
    pub email: String,
    pub shipping_method: ShippingMethod,
}

pub fn validate_checkout(request: &CheckoutRequest) -> Result<ValidCheckout, Vec<String>> {
    let mut errors = Vec::new();

    let product_id = request
        .product_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(catalog::PRIMARY_PRODUCT_ID);
    let product = catalog::product(product_id);
    if product.is_none() {
        errors.push("Invalid productId.".to_string());
    }

    let quantity = request
        .quantity
        .as_ref()
        .and_then(|value| value.as_f64())
        .filter(|q| q.is_finite() && (1.0..=99.0).contains(q))
        .and_then(Decimal::from_f64);
    if quantity.is_none() {
        errors.push("Quantity must be between 1 and 99.".to_string());
    }

    let email = request.email.as_deref().filter(|email| is_valid_email(email));
    if email.is_none() {
        errors.push("A valid email is required.".to_string());
    }

    match (product, quantity, email) {
        (Some(product), Some(quantity), Some(email)) => Ok(ValidCheckout {
            product,
            quantity,
            email: email.to_string(),
            shipping_method: ShippingMethod::resolve(request.shipping_method.as_deref()),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> CheckoutRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("buyer@example.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b c.com"));
    }

    #[test]
    fn test_valid_request_defaults_product_and_method() {
        let valid = validate_checkout(&request(json!({
            "quantity": 2,
            "email": "buyer@example.com"
        })))
        .unwrap();

        assert_eq!(valid.product.id, "muscle-recovery");
        assert_eq!(valid.quantity, Decimal::from(2));
        assert_eq!(valid.shipping_method, ShippingMethod::Standard);
    }

    #[test]
    fn test_empty_product_id_falls_back_to_catalog_item() {
        let valid = validate_checkout(&request(json!({
            "productId": "",
            "quantity": 1,
            "email": "buyer@example.com"
        })))
        .unwrap();
        assert_eq!(valid.product.id, "muscle-recovery");
    }

    #[test]
    fn test_collects_every_violation() {
        let errors = validate_checkout(&request(json!({
            "productId": "creatine",
            "quantity": 0,
            "email": "nope"
        })))
        .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e == "Invalid productId."));
        assert!(errors.iter().any(|e| e == "Quantity must be between 1 and 99."));
        assert!(errors.iter().any(|e| e == "A valid email is required."));
    }

    #[test]
    fn test_quantity_bounds_and_types() {
        for quantity in [json!(0), json!(100), json!("6"), json!(null)] {
            let errors = validate_checkout(&request(json!({
                "quantity": quantity,
                "email": "buyer@example.com"
            })))
            .unwrap_err();
            assert_eq!(errors, vec!["Quantity must be between 1 and 99.".to_string()]);
        }

        assert!(validate_checkout(&request(json!({
            "quantity": 99,
            "email": "buyer@example.com"
        })))
        .is_ok());
    }

    #[test]
    fn test_missing_email_is_reported() {
        let errors = validate_checkout(&request(json!({ "quantity": 1 }))).unwrap_err();
        assert_eq!(errors, vec!["A valid email is required.".to_string()]);
    }
}
