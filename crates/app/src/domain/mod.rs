//! Storefront Domain Concerns

pub mod fulfillment;
pub mod orders;
pub mod products;
pub mod users;
