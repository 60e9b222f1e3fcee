//! Payment methods

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unrecognised payment method name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

/// How the buyer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid through the PayPal widget and captured server-side.
    PayPal,

    /// Card payment via Stripe.
    Stripe,

    /// Paid on delivery, marked paid by an administrator.
    CashOnDelivery,
}

impl PaymentMethod {
    /// All methods, in the order offered at checkout.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::PayPal,
        PaymentMethod::Stripe,
        PaymentMethod::CashOnDelivery,
    ];

    /// Stable name, used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::Stripe => "Stripe",
            PaymentMethod::CashOnDelivery => "CashOnDelivery",
        }
    }

    /// Whether payment is captured online through a provider.
    pub const fn is_online(self) -> bool {
        matches!(self, PaymentMethod::PayPal | PaymentMethod::Stripe)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownPaymentMethod(value.to_string()))
    }
}
