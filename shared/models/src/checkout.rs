use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Currency, ShippingMethod};

/// Shipping address attached to a checkout request. Only `state` influences
/// pricing (tax lookup); the rest is echoed into fulfillment later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutAddress {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Tokenized payment details. Never charged for real; the processor runs in
/// test mode and only logs the last four digits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub token: Option<String>,
    pub card_last4: Option<String>,
}

/// Incoming checkout body. Every field is optional at the wire level so the
/// validation layer can report all problems in one pass instead of failing on
/// the first missing field. `quantity` is kept as a raw JSON value for the
/// same reason: a non-numeric quantity must produce a validation message,
/// not a body-level parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutRequest {
    pub product_id: Option<String>,
    pub quantity: Option<serde_json::Value>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub address: Option<CheckoutAddress>,
    pub shipping_method: Option<String>,
    pub coupon_code: Option<String>,
    pub payment: Option<PaymentInfo>,
}

/// Computed order amounts, each rounded to two decimals before combination.
#[derive(Debug, Clone, Serialize)]
pub struct AmountBreakdown {
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Successful checkout confirmation. `test_mode` signals that no real charge
/// occurred.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: String,
    pub email: String,
    pub product: ProductSummary,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub shipping_method: ShippingMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub amount: AmountBreakdown,
    pub test_mode: bool,
    pub line_items: Vec<LineItem>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checkout_request_tolerates_partial_bodies() {
        let req: CheckoutRequest = serde_json::from_value(json!({
            "email": "buyer@example.com",
            "quantity": "not-a-number"
        }))
        .unwrap();

        assert_eq!(req.email.as_deref(), Some("buyer@example.com"));
        assert!(req.product_id.is_none());
        assert!(req.quantity.unwrap().is_string());
    }

    #[test]
    fn test_amounts_serialize_as_json_numbers() {
        let amount = AmountBreakdown {
            currency: Currency::Usd,
            subtotal: Decimal::new(4900, 2),
            discount: Decimal::ZERO,
            shipping: Decimal::new(495, 2),
            tax: Decimal::ZERO,
            total: Decimal::new(5395, 2),
        };

        let value = serde_json::to_value(&amount).unwrap();
        assert_eq!(value["total"].as_f64(), Some(53.95));
        assert_eq!(value["currency"], "USD");
    }
}
