//! Admin Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{into_status_error, models::OrdersResponse},
    state::State,
};

/// Admin Order Index Handler
///
/// Lists every order, newest first.
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(admin)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
