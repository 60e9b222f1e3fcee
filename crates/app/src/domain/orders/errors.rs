//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::{pricing::PricingError, products::ProductUuid, shipping::ShippingAddressError};
use thiserror::Error;

use crate::domain::products::ProductsServiceError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order has no items")]
    EmptyOrder,

    #[error("item quantities must be at least 1")]
    InvalidQuantity,

    #[error(transparent)]
    InvalidShippingAddress(#[from] ShippingAddressError),

    #[error("unknown products: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    UnknownProducts(Vec<ProductUuid>),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("catalog lookup failed")]
    Catalog(#[source] ProductsServiceError),

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
