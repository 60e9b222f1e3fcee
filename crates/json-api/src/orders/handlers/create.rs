//! Create Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use storefront_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    observability::record_order_placed,
    orders::{
        into_status_error,
        models::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Create Order Handler
///
/// Prices the requested lines from the catalog and places the order for the
/// caller.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        items_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let order = NewOrder::try_from(json.into_inner()).or_400()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(caller.user));
    span.record("items_count", order.items.len());

    let placed = state
        .app
        .orders
        .place_order(caller, order)
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(placed.uuid));
    record_order_placed();

    res.add_header(LOCATION, format!("/orders/{}", placed.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(placed.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront::{payments::PaymentMethod, shipping::ShippingAddressError};
    use storefront_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{Mocks, address, buyer, make_order, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders").post(handler)
    }

    fn draft(payment_method: &str, product: Uuid) -> Value {
        json!({
            "shipping_address": address(),
            "payment_method": payment_method,
            "items": [{ "product": product, "qty": 2, "size": "42", "price": 1 }],
        })
    }

    #[tokio::test]
    async fn places_the_order_for_the_caller() -> TestResult {
        let caller = buyer();
        let order_uuid = OrderUuid::new();
        let product = Uuid::now_v7();
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_place_order()
            .once()
            .withf(move |c, order| {
                *c == caller
                    && order.payment_method == PaymentMethod::PayPal
                    && order.shipping_address == address()
                    && order.items.first().map(|item| (item.product.into_uuid(), item.qty))
                        == Some((product, 2))
            })
            .return_once(move |c, _| Ok(make_order(order_uuid, c.user)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&draft("PayPal", product))
            .send(&service_as(caller, mocks, route()))
            .await;

        let body: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{order_uuid}").as_str()));
        assert_eq!(body.total_price, 35_000);
        assert!(!body.is_paid);
        assert!(!body.is_delivered);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_payment_methods_return_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.orders.expect_place_order().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&draft("Barter", Uuid::now_v7()))
            .send(&service_as(buyer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_bodies_return_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.orders.expect_place_order().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "items": "everything" }))
            .send(&service_as(buyer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn validation_failures_return_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_place_order()
            .once()
            .return_once(|_, _| {
                Err(OrdersServiceError::InvalidShippingAddress(
                    ShippingAddressError::PostalCode,
                ))
            });

        let res = TestClient::post("http://example.com/orders")
            .json(&draft("PayPal", Uuid::now_v7()))
            .send(&service_as(buyer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_products_return_400() -> TestResult {
        let product = Uuid::now_v7();
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_place_order()
            .once()
            .return_once(move |_, _| Err(OrdersServiceError::UnknownProducts(vec![product.into()])));

        let res = TestClient::post("http://example.com/orders")
            .json(&draft("PayPal", product))
            .send(&service_as(buyer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
