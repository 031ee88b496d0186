//! Simulated payment processing. Orders are never charged for real: the
//! processor approves everything and flags the receipt as test mode. A real
//! gateway integration replaces this module behind the same signature, at
//! which point a declined charge surfaces as `ServiceError::PaymentDeclined`
//! (HTTP 402).

use rust_decimal::Decimal;

use storefront_models::checkout::PaymentInfo;

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub approved: bool,
    pub test_mode: bool,
}

pub fn process_test_charge(
    email: &str,
    total: Decimal,
    payment: Option<&PaymentInfo>,
) -> Result<PaymentReceipt, ServiceError> {
    if let Some(card_last4) = payment.and_then(|p| p.card_last4.as_deref()) {
        tracing::debug!(email = %email, total = %total, card_last4 = %card_last4, "simulating charge");
    } else {
        tracing::debug!(email = %email, total = %total, "simulating charge without payment details");
    }

    Ok(PaymentReceipt {
        approved: true,
        test_mode: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_always_approves_in_test_mode() {
        let receipt = process_test_charge("buyer@example.com", Decimal::new(5395, 2), None)
            .expect("simulated charge never declines");
        assert!(receipt.approved);
        assert!(receipt.test_mode);
    }
}
