//! Storefront persistence, services and back-office operations.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod payments;

#[cfg(test)]
mod test;
