//! Storefront
//!
//! Storefront is the shopper-facing core of the shop: money and pricing, the
//! persisted cart, shipping validation, payment methods, the checkout step
//! sequencer and order drafts. It performs no network or database I/O; the
//! only side effect is the cart's storage boundary.

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod payments;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod shipping;
pub mod uuids;
