//! Fulfillment
//!
//! Back-office transitions of an order's paid and delivered flags.

pub mod errors;
pub mod service;

pub use errors::FulfillmentServiceError;
pub use service::*;
