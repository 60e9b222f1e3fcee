//! Payments service errors.

use sqlx::Error;
use thiserror::Error;

use crate::payments::PaymentProviderError;

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order is already paid")]
    AlreadyPaid,

    #[error("order is not payable online")]
    UnsupportedPaymentMethod,

    #[error("no payment has been started for this order")]
    MissingIntent,

    #[error("payment does not belong to this order")]
    IntentMismatch,

    #[error("payment was not completed (status {status})")]
    PaymentNotCompleted { status: String },

    #[error("payment provider error")]
    Upstream(#[from] PaymentProviderError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PaymentsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
