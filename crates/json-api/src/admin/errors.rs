//! Fulfillment Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::fulfillment::FulfillmentServiceError;

pub(crate) fn into_status_error(error: FulfillmentServiceError) -> StatusError {
    match error {
        FulfillmentServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        FulfillmentServiceError::AlreadyPaid => {
            StatusError::bad_request().brief("Order is already paid")
        }
        FulfillmentServiceError::AlreadyDelivered => {
            StatusError::bad_request().brief("Order is already delivered")
        }
        FulfillmentServiceError::Sql(source) => {
            error!("fulfillment storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
