//! Admin Mark Delivered Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    admin::errors::into_status_error,
    extensions::*,
    observability::{FulfillmentAction, record_fulfillment_action},
    orders::models::OrderResponse,
    state::State,
};

/// Admin Mark Delivered Handler
///
/// Records delivery of an order.
#[endpoint(
    tags("admin"),
    summary = "Mark Order Delivered",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order delivered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is already delivered"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Administrator access required"),
    ),
)]
#[tracing::instrument(
    name = "admin.orders.deliver",
    skip(order, depot),
    fields(order_uuid = tracing::field::Empty, admin_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;
    let order = order.into_inner();

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("admin_uuid", tracing::field::display(admin.user()));

    let delivered = state
        .app
        .fulfillment
        .mark_delivered(admin, order.into())
        .await
        .map_err(into_status_error)?;

    record_fulfillment_action(FulfillmentAction::Delivered);

    Ok(Json(delivered.into()))
}
