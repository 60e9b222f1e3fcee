//! Orders

mod errors;
pub(crate) mod handlers;
pub(crate) mod models;

pub(crate) use errors::{into_status_error, payment_status_error};
pub(crate) use handlers::*;
