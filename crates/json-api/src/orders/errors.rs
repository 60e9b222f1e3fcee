//! Order and payment errors.

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::{domain::orders::OrdersServiceError, payments::PaymentsServiceError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::EmptyOrder
        | OrdersServiceError::InvalidQuantity
        | OrdersServiceError::InvalidShippingAddress(_)
        | OrdersServiceError::UnknownProducts(_)
        | OrdersServiceError::Pricing(_) => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::AlreadyExists => {
            error!("order uuid collision");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Catalog(source) => {
            error!("failed to price order from the catalog: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn payment_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        PaymentsServiceError::AlreadyPaid => {
            StatusError::bad_request().brief("Order is already paid")
        }
        PaymentsServiceError::UnsupportedPaymentMethod
        | PaymentsServiceError::MissingIntent
        | PaymentsServiceError::IntentMismatch => {
            StatusError::bad_request().brief(error.to_string())
        }
        PaymentsServiceError::PaymentNotCompleted { status } => {
            warn!(status = %status, "payment provider did not complete the capture");

            StatusError::bad_gateway().brief("Payment was not completed")
        }
        PaymentsServiceError::Upstream(source) => {
            error!("payment provider error: {source}");

            StatusError::bad_gateway().brief("Payment provider unavailable")
        }
        PaymentsServiceError::Sql(source) => {
            error!("payment storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
