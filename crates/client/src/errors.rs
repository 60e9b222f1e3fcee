//! Client errors.

use reqwest::StatusCode;
use storefront::{cart::CartStoreError, orders::OrderDraftError};
use thiserror::Error;

/// Failures talking to the storefront API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API token configured for an authenticated call.
    #[error("an API token is required; set STOREFRONT_TOKEN")]
    MissingToken,

    /// Transport or decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// Response status.
        status: StatusCode,

        /// Response body, usually the API's error message.
        message: String,
    },
}

/// Failures placing the cart as an order.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Another submission from this client has not finished yet.
    #[error("an order is already being placed")]
    SubmissionInFlight,

    /// The cart is not ready to be ordered.
    #[error(transparent)]
    Draft(#[from] OrderDraftError),

    /// The API call failed or was refused.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The order was placed but the cart could not be cleared.
    #[error("order placed but the cart could not be cleared: {0}")]
    Cart(#[from] CartStoreError),
}
