//! My Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{into_status_error, models::OrdersResponse},
    state::State,
};

/// My Orders Handler
///
/// Lists the caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let orders = state
        .app
        .orders
        .list_my_orders(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::records::OrderUuid;

    use crate::test_helpers::{Mocks, buyer, make_order, service_as};

    use super::*;

    #[tokio::test]
    async fn lists_the_callers_orders_in_service_order() -> TestResult {
        let caller = buyer();
        let newer = OrderUuid::new();
        let older = OrderUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_list_my_orders()
            .once()
            .withf(move |c| *c == caller)
            .return_once(move |c| {
                Ok(vec![make_order(newer, c.user), make_order(older, c.user)])
            });

        let body: OrdersResponse = TestClient::get("http://example.com/orders/mine")
            .send(&service_as(
                caller,
                mocks,
                Router::with_path("orders/mine").get(handler),
            ))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = body.orders.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, [newer.into_uuid(), older.into_uuid()]);

        Ok(())
    }
}
