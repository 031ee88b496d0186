//! Constant tables the storefront sells from: the product catalog, coupon
//! codes, tax rates, shipping rates, and subscription plans. All process-wide
//! immutable; a future admin backend would replace these with database reads.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::collections::HashMap;

use storefront_models::subscribe::PlanInterval;
use storefront_models::{Currency, ShippingMethod};

#[derive(Debug, Clone)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub currency: Currency,
}

/// The single item this storefront sells. Requests without a productId fall
/// back to it.
pub const PRIMARY_PRODUCT_ID: &str = "muscle-recovery";

static PRODUCTS: Lazy<HashMap<&'static str, Product>> = Lazy::new(|| {
    HashMap::from([(
        PRIMARY_PRODUCT_ID,
        Product {
            id: PRIMARY_PRODUCT_ID,
            name: "Muscle Recovery Supplement",
            currency: Currency::Usd,
        },
    )])
});

pub fn product(id: &str) -> Option<&'static Product> {
    PRODUCTS.get(id)
}

#[derive(Debug, Clone)]
pub enum CouponKind {
    /// Percentage off the subtotal.
    Percent(Decimal),
    /// Flat amount off, only granted at or above the minimum subtotal.
    Fixed {
        amount: Decimal,
        min_subtotal: Option<Decimal>,
    },
    /// No subtotal effect; waives standard shipping.
    FreeShipping,
}

#[derive(Debug, Clone)]
pub struct Coupon {
    pub code: &'static str,
    pub kind: CouponKind,
}

static COUPONS: Lazy<HashMap<&'static str, Coupon>> = Lazy::new(|| {
    HashMap::from([
        (
            "SUPP10",
            Coupon {
                code: "SUPP10",
                kind: CouponKind::Percent(Decimal::new(10, 0)),
            },
        ),
        (
            "FREESHIP",
            Coupon {
                code: "FREESHIP",
                kind: CouponKind::FreeShipping,
            },
        ),
        // Extra $5 off orders >= $100
        (
            "BULK5",
            Coupon {
                code: "BULK5",
                kind: CouponKind::Fixed {
                    amount: Decimal::new(5, 0),
                    min_subtotal: Some(Decimal::new(100, 0)),
                },
            },
        ),
    ])
});

/// Look up a coupon by code, trimmed and case-insensitive. Unknown codes are
/// simply absent; callers treat that as "no coupon", never as an error.
pub fn coupon(code: &str) -> Option<&'static Coupon> {
    COUPONS.get(code.trim().to_uppercase().as_str())
}

static TAX_RATES_BY_STATE: Lazy<HashMap<&'static str, Decimal>> = Lazy::new(|| {
    HashMap::from([
        ("CA", Decimal::new(825, 4)),
        ("NY", Decimal::new(8875, 5)),
        ("FL", Decimal::new(7, 2)),
        ("TX", Decimal::new(625, 4)),
    ])
});

/// Sales tax rate for a state code; unknown or missing states are untaxed.
pub fn tax_rate_for_state(state: &str) -> Decimal {
    TAX_RATES_BY_STATE
        .get(state.to_uppercase().as_str())
        .copied()
        .unwrap_or(Decimal::ZERO)
}

pub fn shipping_rate(method: ShippingMethod) -> Decimal {
    match method {
        ShippingMethod::Standard => Decimal::new(495, 2),
        ShippingMethod::Express => Decimal::new(1200, 2),
    }
}

/// Discounted subtotal at or above this ships free via the standard method.
pub fn free_shipping_threshold() -> Decimal {
    Decimal::new(75, 0)
}

#[derive(Debug, Clone)]
pub struct Plan {
    pub id: &'static str,
    pub label: &'static str,
    pub price: Decimal,
    pub interval: PlanInterval,
}

static PLANS: Lazy<HashMap<&'static str, Plan>> = Lazy::new(|| {
    HashMap::from([
        (
            "monthly",
            Plan {
                id: "monthly",
                label: "Monthly",
                price: Decimal::new(39, 0),
                interval: PlanInterval::Month,
            },
        ),
        (
            "quarterly",
            Plan {
                id: "quarterly",
                label: "Quarterly",
                price: Decimal::new(99, 0),
                interval: PlanInterval::Quarter,
            },
        ),
        (
            "yearly",
            Plan {
                id: "yearly",
                label: "Yearly",
                price: Decimal::new(349, 0),
                interval: PlanInterval::Year,
            },
        ),
    ])
});

/// Resolve a plan id; unknown or missing ids fall back to the monthly plan.
pub fn plan(id: Option<&str>) -> &'static Plan {
    id.and_then(|id| PLANS.get(id))
        .unwrap_or_else(|| &PLANS["monthly"])
}

/// Recurring-charge coupon codes. `percent_off` of `None` marks codes that
/// are recognized but do not reduce the charge.
#[derive(Debug, Clone, Copy)]
pub struct PlanCoupon {
    pub percent_off: Option<u32>,
}

static PLAN_COUPONS: Lazy<HashMap<&'static str, PlanCoupon>> = Lazy::new(|| {
    HashMap::from([
        ("SAVE10", PlanCoupon { percent_off: Some(10) }),
        ("SAVE20", PlanCoupon { percent_off: Some(20) }),
        ("FREESHIP", PlanCoupon { percent_off: None }),
    ])
});

pub fn plan_coupon(code: &str) -> Option<(String, PlanCoupon)> {
    let normalized = code.trim().to_uppercase();
    if normalized.is_empty() {
        return None;
    }
    PLAN_COUPONS
        .get(normalized.as_str())
        .map(|coupon| (normalized, *coupon))
}
