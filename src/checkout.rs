//! Checkout steps
//!
//! Checkout walks through four ordered steps. Which step a shopper may enter
//! is inferred entirely from the cart; no "current step" is stored. These
//! guards are navigational only, the server validates every order itself.

use std::fmt;

use crate::cart::Cart;

/// A stage of checkout, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStep {
    /// Enter a shipping address
    Shipping,

    /// Choose a payment method
    Payment,

    /// Review and place the order
    PlaceOrder,

    /// Order placed
    Confirmation,
}

impl CheckoutStep {
    /// Every step in order.
    pub const ALL: [CheckoutStep; 4] = [
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
        CheckoutStep::PlaceOrder,
        CheckoutStep::Confirmation,
    ];

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping Address",
            CheckoutStep::Payment => "Payment Method",
            CheckoutStep::PlaceOrder => "Place Order",
            CheckoutStep::Confirmation => "Confirmation",
        }
    }

    /// The step after this one.
    pub const fn next(self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Shipping => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::PlaceOrder),
            CheckoutStep::PlaceOrder => Some(CheckoutStep::Confirmation),
            CheckoutStep::Confirmation => None,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a redirected shopper is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Back to the storefront root
    Storefront,

    /// Back to an earlier checkout step
    Step(CheckoutStep),
}

/// Outcome of trying to enter a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepGuard {
    /// The step may be shown.
    Proceed,

    /// A prerequisite is missing.
    Redirect(Destination),
}

/// Check whether `step` may be entered with the given cart.
///
/// For [`CheckoutStep::PlaceOrder`] an empty cart wins over a missing
/// payment method, which wins over a missing shipping address.
pub fn enter(step: CheckoutStep, cart: &Cart) -> StepGuard {
    match step {
        CheckoutStep::Shipping | CheckoutStep::Confirmation => StepGuard::Proceed,
        CheckoutStep::Payment if cart.shipping_address.is_none() => {
            StepGuard::Redirect(Destination::Step(CheckoutStep::Shipping))
        }
        CheckoutStep::Payment => StepGuard::Proceed,
        CheckoutStep::PlaceOrder if cart.is_empty() => StepGuard::Redirect(Destination::Storefront),
        CheckoutStep::PlaceOrder if cart.payment_method.is_none() => {
            StepGuard::Redirect(Destination::Step(CheckoutStep::Payment))
        }
        CheckoutStep::PlaceOrder if cart.shipping_address.is_none() => {
            StepGuard::Redirect(Destination::Step(CheckoutStep::Shipping))
        }
        CheckoutStep::PlaceOrder => StepGuard::Proceed,
    }
}

/// The latest step before confirmation that the cart allows entering.
pub fn furthest_step(cart: &Cart) -> CheckoutStep {
    [CheckoutStep::PlaceOrder, CheckoutStep::Payment]
        .into_iter()
        .find(|step| enter(*step, cart) == StepGuard::Proceed)
        .unwrap_or(CheckoutStep::Shipping)
}
