//! Online payment capture.

mod errors;
mod paypal;
mod provider;
mod service;

pub use errors::*;
pub use paypal::*;
pub use provider::*;
pub use service::*;
