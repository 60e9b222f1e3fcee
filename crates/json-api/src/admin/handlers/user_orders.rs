//! Admin User Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{into_status_error, models::OrdersResponse},
    state::State,
};

/// Admin User Orders Handler
///
/// Lists one user's orders, newest first.
#[endpoint(
    tags("admin"),
    summary = "List User Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let orders = state
        .app
        .orders
        .list_user_orders(admin, user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{orders::records::OrderUuid, users::records::UserUuid};

    use crate::test_helpers::{Mocks, admin, buyer, make_order, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/users/{user}/orders").get(handler)
    }

    #[tokio::test]
    async fn lists_the_users_orders() -> TestResult {
        let user = UserUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_list_user_orders()
            .once()
            .withf(move |_, u| *u == user)
            .return_once(move |_, u| Ok(vec![make_order(OrderUuid::new(), u)]));

        let body: OrdersResponse =
            TestClient::get(format!("http://example.com/admin/users/{user}/orders"))
                .send(&service_as(admin(), mocks, route()))
                .await
                .take_json()
                .await?;

        assert_eq!(
            body.orders.first().map(|order| order.user),
            Some(user.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn buyers_get_401() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.orders.expect_list_user_orders().never();

        let res = TestClient::get(format!(
            "http://example.com/admin/users/{}/orders",
            UserUuid::new()
        ))
        .send(&service_as(buyer(), mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
