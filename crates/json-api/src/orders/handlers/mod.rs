//! Order Handlers

pub(crate) mod capture_payment;
pub(crate) mod create;
pub(crate) mod create_payment;
pub(crate) mod get;
pub(crate) mod mine;
