//! Admin Handlers

pub(crate) mod deliver;
pub(crate) mod fulfil;
pub(crate) mod orders;
pub(crate) mod pay;
pub(crate) mod user_orders;
