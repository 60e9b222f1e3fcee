//! Fulfillment service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FulfillmentServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order is already paid")]
    AlreadyPaid,

    #[error("order is already delivered")]
    AlreadyDelivered,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for FulfillmentServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
