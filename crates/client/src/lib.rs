//! Storefront shopper client.
//!
//! Talks to the JSON API on behalf of a shopper whose cart lives in a local
//! file: places the checked-out cart as an order exactly once, lists orders
//! and drives the online payment steps.

pub mod errors;
pub mod gateway;
pub mod submitter;

pub use errors::{GatewayError, SubmitError};
pub use gateway::{HttpOrderGateway, OrderGateway, PlacedOrder};
pub use submitter::OrderSubmitter;
