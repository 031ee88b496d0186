use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Currency;

/// Billing cadence of a subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInterval {
    Month,
    Quarter,
    Year,
}

/// Lifecycle state of a subscription. Creation always lands on `Active`; the
/// other states exist for records imported from a future billing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Pending,
    Canceled,
    PastDue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeAddress {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Incoming subscribe body. `quantity` stays a raw JSON value because the
/// handler coerces rather than validates it: strings parse if numeric, and
/// everything unusable clamps to one unit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscribePayload {
    pub email: Option<String>,
    pub plan_id: Option<String>,
    pub quantity: Option<serde_json::Value>,
    pub name: Option<String>,
    pub address: Option<SubscribeAddress>,
    pub payment_method_id: Option<String>,
    pub coupon: Option<String>,
    pub meta: Option<serde_json::Value>,
}

/// Coupon outcome recorded on the subscription. `amount_off` is zero for
/// recognized codes that do not reduce the recurring charge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_off: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub status: SubscriptionStatus,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub plan_id: String,
    pub interval: PlanInterval,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<AppliedDiscount>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub next_billing_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<SubscribeAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub success: bool,
    pub subscription_id: String,
    pub subscription: Subscription,
    pub message: String,
}
