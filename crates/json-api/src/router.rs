//! App Router

use salvo::Router;

use crate::{admin, auth, healthcheck, orders, products, users};

/// Public catalog routes plus the authenticated buyer and back-office routes.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("categories").get(products::categories::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::handler)
                .push(orders_router())
                .push(admin_router()),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .post(orders::create::handler)
        .push(Router::with_path("mine").get(orders::mine::handler))
        .push(
            Router::with_path("{order}")
                .get(orders::get::handler)
                .push(
                    Router::with_path("create-paypal-order")
                        .post(orders::create_payment::handler),
                )
                .push(
                    Router::with_path("capture-paypal-order")
                        .post(orders::capture_payment::handler),
                ),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .push(
            Router::with_path("orders").get(admin::orders::handler).push(
                Router::with_path("{order}")
                    .push(Router::with_path("pay").put(admin::pay::handler))
                    .push(Router::with_path("deliver").put(admin::deliver::handler))
                    .push(Router::with_path("fulfil").put(admin::fulfil::handler)),
            ),
        )
        .push(
            Router::with_path("users").get(users::index::handler).push(
                Router::with_path("{user}")
                    .get(users::get::handler)
                    .put(users::update::handler)
                    .delete(users::delete::handler)
                    .push(Router::with_path("orders").get(admin::user_orders::handler)),
            ),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use storefront_app::{
        auth::AuthServiceError,
        domain::{orders::records::OrderUuid, users::records::UserUuid},
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, admin, make_order, make_user};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(Router::new().hoop(inject(mocks.into_state())).push(app_router()))
    }

    #[tokio::test]
    async fn catalog_is_public() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.auth.expect_authenticate_bearer().never();
        mocks
            .products
            .expect_list_categories()
            .once()
            .return_once(|| Ok(vec!["Shoes".to_string()]));

        let res = TestClient::get("http://example.com/products/categories")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn orders_require_a_token() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.auth.expect_authenticate_bearer().never();
        mocks.orders.expect_list_my_orders().never();

        let res = TestClient::get("http://example.com/orders/mine")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn revoked_tokens_cannot_reach_admin_routes() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));
        mocks.fulfillment.expect_deliver().never();

        let res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/fulfil",
            OrderUuid::new()
        ))
        .add_header(AUTHORIZATION, "Bearer revoked", true)
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn admins_reach_back_office_routes_through_the_token() -> TestResult {
        let caller = admin();
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "admin-token")
            .return_once(move |_| Ok(caller));
        mocks
            .fulfillment
            .expect_mark_delivered()
            .once()
            .withf(move |a, o| a.user() == caller.user && *o == uuid)
            .return_once(move |_, o| {
                let mut order = make_order(o, caller.user);

                order.is_delivered = true;

                Ok(order)
            });

        let mut res = TestClient::put(format!("http://example.com/admin/orders/{uuid}/deliver"))
            .add_header(AUTHORIZATION, "Bearer admin-token", true)
            .send(&make_service(mocks))
            .await;

        let body: orders::models::OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_delivered);

        Ok(())
    }

    #[tokio::test]
    async fn user_routes_share_the_user_segment() -> TestResult {
        let caller = admin();
        let user = UserUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_authenticate_bearer()
            .times(2)
            .returning(move |_| Ok(caller));
        mocks
            .users
            .expect_get_user()
            .once()
            .withf(move |u| *u == user)
            .return_once(move |_| Ok(make_user(user)));
        mocks
            .orders
            .expect_list_user_orders()
            .once()
            .return_once(|_, _| Ok(Vec::new()));

        let service = make_service(mocks);

        let res = TestClient::get(format!("http://example.com/admin/users/{user}"))
            .add_header(AUTHORIZATION, "Bearer admin-token", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let res = TestClient::get(format!("http://example.com/admin/users/{user}/orders"))
            .add_header(AUTHORIZATION, "Bearer admin-token", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
