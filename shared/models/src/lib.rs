use serde::{Deserialize, Serialize};

pub mod checkout;
pub mod subscribe;

/// The only currency the storefront quotes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
}

/// Shipping options offered at checkout. Anything the client sends that is
/// not `express` resolves to `standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    Standard,
    Express,
}

impl ShippingMethod {
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some("express") => ShippingMethod::Express,
            _ => ShippingMethod::Standard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Standard",
            ShippingMethod::Express => "Express",
        }
    }
}
