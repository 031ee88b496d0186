//! Subscription plumbing: quantity coercion, coupon application, billing
//! schedule, and the append-only store the handler writes into.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use storefront_models::subscribe::{AppliedDiscount, PlanInterval, Subscription};

use crate::errors::ServiceError;

use super::catalog;
use super::pricing::round2;

/// Coerce the raw quantity value. Numbers and numeric strings are used as-is;
/// anything non-finite or non-positive clamps to 1; everything is floored and
/// capped at 10 units.
pub fn clamp_quantity(raw: Option<&serde_json::Value>) -> u32 {
    let n = match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(serde_json::Value::String(s)) => s.parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    };

    if !n.is_finite() || n <= 0.0 {
        return 1;
    }
    n.floor().min(10.0) as u32
}

/// Interval lengths are fixed day counts, not calendar arithmetic.
pub fn next_billing_date(interval: PlanInterval, from: DateTime<Utc>) -> DateTime<Utc> {
    let days = match interval {
        PlanInterval::Month => 30,
        PlanInterval::Quarter => 90,
        PlanInterval::Year => 365,
    };
    from + Duration::days(days)
}

/// Apply a recurring-charge coupon to the subtotal. Unrecognized codes are
/// ignored without error; recognized no-op codes are echoed with zero off.
pub fn apply_coupon(subtotal: Decimal, code: Option<&str>) -> (Decimal, Option<AppliedDiscount>) {
    let Some((code, coupon)) = code.and_then(catalog::plan_coupon) else {
        return (subtotal, None);
    };

    match coupon.percent_off {
        Some(percent) => {
            let amount_off = round2(subtotal * Decimal::from(percent) / Decimal::ONE_HUNDRED);
            let total = (subtotal - amount_off).max(Decimal::ZERO);
            (
                total,
                Some(AppliedDiscount {
                    code,
                    amount_off,
                    percent_off: Some(percent),
                }),
            )
        }
        None => (
            subtotal,
            Some(AppliedDiscount {
                code,
                amount_off: Decimal::ZERO,
                percent_off: None,
            }),
        ),
    }
}

/// Where new subscriptions are recorded. The handler treats append failures
/// as non-fatal: the subscription response is returned either way.
pub trait SubscriptionStore: Send + Sync {
    fn append(&self, subscription: Subscription) -> Result<(), ServiceError>;
}

/// Process-lifetime store backing the dev/demo deployment. Append-only; there
/// is no read, update, or cancel path, and everything is lost on restart.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    records: Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubscriptionStore for InMemorySubscriptionStore {
    fn append(&self, subscription: Subscription) -> Result<(), ServiceError> {
        self.records.lock().push(subscription);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_models::subscribe::SubscriptionStatus;
    use storefront_models::Currency;

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(Some(&json!(3))), 3);
        assert_eq!(clamp_quantity(Some(&json!("4"))), 4);
        assert_eq!(clamp_quantity(Some(&json!(9.9))), 9);
        assert_eq!(clamp_quantity(Some(&json!(15))), 10);
        assert_eq!(clamp_quantity(Some(&json!(0))), 1);
        assert_eq!(clamp_quantity(Some(&json!(-5))), 1);
        assert_eq!(clamp_quantity(Some(&json!("abc"))), 1);
        assert_eq!(clamp_quantity(Some(&json!(null))), 1);
        assert_eq!(clamp_quantity(None), 1);
    }

    #[test]
    fn test_next_billing_date_day_counts() {
        let from = Utc::now();
        assert_eq!(next_billing_date(PlanInterval::Month, from) - from, Duration::days(30));
        assert_eq!(next_billing_date(PlanInterval::Quarter, from) - from, Duration::days(90));
        assert_eq!(next_billing_date(PlanInterval::Year, from) - from, Duration::days(365));
    }

    #[test]
    fn test_apply_coupon_percent() {
        let (total, discount) = apply_coupon(Decimal::new(39, 0), Some("SAVE10"));
        assert_eq!(total, Decimal::new(3510, 2));
        let discount = discount.unwrap();
        assert_eq!(discount.code, "SAVE10");
        assert_eq!(discount.amount_off, Decimal::new(390, 2));
        assert_eq!(discount.percent_off, Some(10));
    }

    #[test]
    fn test_apply_coupon_noop_and_unknown() {
        let (total, discount) = apply_coupon(Decimal::new(99, 0), Some("freeship"));
        assert_eq!(total, Decimal::new(99, 0));
        assert_eq!(discount.unwrap().amount_off, Decimal::ZERO);

        let (total, discount) = apply_coupon(Decimal::new(99, 0), Some("MYSTERY"));
        assert_eq!(total, Decimal::new(99, 0));
        assert!(discount.is_none());

        let (total, discount) = apply_coupon(Decimal::new(99, 0), None);
        assert_eq!(total, Decimal::new(99, 0));
        assert!(discount.is_none());
    }

    fn sample_subscription() -> Subscription {
        let now = Utc::now();
        Subscription {
            id: "sub_test".to_string(),
            status: SubscriptionStatus::Active,
            email: "member@example.com".to_string(),
            name: None,
            plan_id: "monthly".to_string(),
            interval: PlanInterval::Month,
            quantity: 1,
            unit_price: Decimal::new(39, 0),
            discount: None,
            total: Decimal::new(39, 0),
            currency: Currency::Usd,
            created_at: now,
            next_billing_date: next_billing_date(PlanInterval::Month, now),
            address: None,
            meta: None,
        }
    }

    #[test]
    fn test_in_memory_store_appends() {
        let store = InMemorySubscriptionStore::new();
        assert!(store.is_empty());
        store.append(sample_subscription()).unwrap();
        store.append(sample_subscription()).unwrap();
        assert_eq!(store.len(), 2);
    }
}
