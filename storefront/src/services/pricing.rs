//! The pricing engine: pure arithmetic over `Decimal`, no clock, no I/O.
//!
//! Every amount is rounded to two decimals before it is combined with
//! another, so the final total never carries floating-point residue.

use rust_decimal::{Decimal, RoundingStrategy};

use storefront_models::ShippingMethod;

use super::catalog::{self, Coupon, CouponKind};

/// Round to cents, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Tiered unit price. The tier price applies to every unit in the order,
/// not incrementally.
pub fn unit_price_for_quantity(quantity: Decimal) -> Decimal {
    if quantity >= Decimal::from(6) {
        Decimal::new(39, 0)
    } else if quantity >= Decimal::from(3) {
        Decimal::new(44, 0)
    } else {
        Decimal::new(49, 0)
    }
}

/// Subtotal reduction for a coupon. Free-shipping coupons contribute zero
/// here; they are honored by the shipping rule instead.
pub fn discount_for(coupon: Option<&Coupon>, subtotal: Decimal) -> Decimal {
    let Some(coupon) = coupon else {
        return Decimal::ZERO;
    };

    match &coupon.kind {
        CouponKind::Percent(percent) => round2(subtotal * percent / Decimal::ONE_HUNDRED),
        CouponKind::Fixed { amount, min_subtotal } => {
            if let Some(min) = min_subtotal {
                if subtotal < *min {
                    return Decimal::ZERO;
                }
            }
            round2(*amount).min(subtotal)
        }
        CouponKind::FreeShipping => Decimal::ZERO,
    }
}

/// Standard shipping is free above the threshold or with a free-shipping
/// coupon; express shipping is never free.
pub fn is_free_shipping(
    coupon: Option<&Coupon>,
    method: ShippingMethod,
    discounted_subtotal: Decimal,
) -> bool {
    if method != ShippingMethod::Standard {
        return false;
    }
    if discounted_subtotal >= catalog::free_shipping_threshold() {
        return true;
    }
    matches!(coupon, Some(Coupon { kind: CouponKind::FreeShipping, .. }))
}

/// Tax on the discounted subtotal. Shipping is not taxed.
pub fn tax_for(discounted_subtotal: Decimal, state: Option<&str>) -> Decimal {
    let rate = state.map(catalog::tax_rate_for_state).unwrap_or(Decimal::ZERO);
    round2(rate * discounted_subtotal)
}

/// A fully computed order quote.
#[derive(Debug, Clone)]
pub struct OrderQuote {
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub discounted_subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

pub fn price_order(
    quantity: Decimal,
    method: ShippingMethod,
    coupon_code: Option<&str>,
    state: Option<&str>,
) -> OrderQuote {
    let coupon = coupon_code.and_then(catalog::coupon);

    let unit_price = unit_price_for_quantity(quantity);
    let subtotal = round2(unit_price * quantity);
    let discount = discount_for(coupon, subtotal);
    let discounted_subtotal = round2(subtotal - discount);

    let shipping = if is_free_shipping(coupon, method, discounted_subtotal) {
        Decimal::ZERO
    } else {
        catalog::shipping_rate(method)
    };

    let tax = tax_for(discounted_subtotal, state);
    let total = round2(discounted_subtotal + shipping + tax);

    OrderQuote {
        unit_price,
        subtotal,
        discount,
        discounted_subtotal,
        shipping,
        tax,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(dec(2005, 3)), dec(201, 2)); // 2.005 -> 2.01
        assert_eq!(round2(dec(-2005, 3)), dec(-201, 2));
        assert_eq!(round2(dec(173745, 4)), dec(1737, 2)); // 17.3745 -> 17.37
    }

    #[test]
    fn test_unit_price_tiers() {
        assert_eq!(unit_price_for_quantity(Decimal::from(1)), dec(49, 0));
        assert_eq!(unit_price_for_quantity(Decimal::from(2)), dec(49, 0));
        assert_eq!(unit_price_for_quantity(Decimal::from(3)), dec(44, 0));
        assert_eq!(unit_price_for_quantity(Decimal::from(5)), dec(44, 0));
        assert_eq!(unit_price_for_quantity(Decimal::from(6)), dec(39, 0));
        assert_eq!(unit_price_for_quantity(Decimal::from(99)), dec(39, 0));
    }

    #[test]
    fn test_percent_discount() {
        let coupon = catalog::coupon("SUPP10");
        assert_eq!(discount_for(coupon, dec(234, 0)), dec(2340, 2));
    }

    #[test]
    fn test_fixed_discount_requires_minimum_and_never_exceeds_subtotal() {
        let bulk5 = catalog::coupon("BULK5");
        assert_eq!(discount_for(bulk5, dec(99, 0)), Decimal::ZERO);
        assert_eq!(discount_for(bulk5, dec(100, 0)), dec(5, 0));
        assert_eq!(discount_for(bulk5, dec(200, 0)), dec(5, 0));

        // No-minimum fixed coupons cap at the subtotal.
        let uncapped = Coupon {
            code: "TEST",
            kind: CouponKind::Fixed {
                amount: dec(5, 0),
                min_subtotal: None,
            },
        };
        assert_eq!(discount_for(Some(&uncapped), dec(3, 0)), dec(3, 0));
    }

    #[test]
    fn test_unknown_coupon_is_silent() {
        let quote = price_order(Decimal::from(1), ShippingMethod::Standard, Some("NOPE"), None);
        assert_eq!(quote.discount, Decimal::ZERO);
    }

    #[test]
    fn test_free_shipping_rules() {
        let freeship = catalog::coupon("FREESHIP");
        assert!(is_free_shipping(None, ShippingMethod::Standard, dec(75, 0)));
        assert!(!is_free_shipping(None, ShippingMethod::Standard, dec(7499, 2)));
        assert!(is_free_shipping(freeship, ShippingMethod::Standard, dec(10, 0)));
        // Express is never free.
        assert!(!is_free_shipping(freeship, ShippingMethod::Express, dec(500, 0)));
        assert!(!is_free_shipping(None, ShippingMethod::Express, dec(500, 0)));
    }

    #[test]
    fn test_single_unit_standard_quote() {
        let quote = price_order(Decimal::from(1), ShippingMethod::Standard, None, None);
        assert_eq!(quote.unit_price, dec(49, 0));
        assert_eq!(quote.subtotal, dec(49, 0));
        assert_eq!(quote.discount, Decimal::ZERO);
        assert_eq!(quote.shipping, dec(495, 2));
        assert_eq!(quote.tax, Decimal::ZERO);
        assert_eq!(quote.total, dec(5395, 2));
    }

    #[test]
    fn test_bulk_order_with_coupon_and_tax() {
        let quote = price_order(
            Decimal::from(6),
            ShippingMethod::Standard,
            Some("SUPP10"),
            Some("CA"),
        );
        assert_eq!(quote.unit_price, dec(39, 0));
        assert_eq!(quote.subtotal, dec(234, 0));
        assert_eq!(quote.discount, dec(2340, 2));
        assert_eq!(quote.discounted_subtotal, dec(21060, 2));
        assert_eq!(quote.shipping, Decimal::ZERO);
        assert_eq!(quote.tax, dec(1737, 2));
        assert_eq!(quote.total, dec(22797, 2));
    }

    #[test]
    fn test_express_shipping_charged_with_tax_untouched() {
        let quote = price_order(
            Decimal::from(6),
            ShippingMethod::Express,
            None,
            Some("TX"),
        );
        assert_eq!(quote.shipping, dec(1200, 2));
        // 234 * 0.0625 = 14.625 -> 14.63 (tax excludes shipping)
        assert_eq!(quote.tax, dec(1463, 2));
        assert_eq!(quote.total, dec(26063, 2));
    }

    #[test]
    fn test_all_amounts_are_cent_multiples() {
        let quote = price_order(
            Decimal::from(7),
            ShippingMethod::Express,
            Some("SUPP10"),
            Some("NY"),
        );
        for amount in [
            quote.subtotal,
            quote.discount,
            quote.discounted_subtotal,
            quote.shipping,
            quote.tax,
            quote.total,
        ] {
            assert_eq!(round2(amount), amount, "{amount} is not a cent multiple");
        }
    }
}
