//! Create Payment Intent Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, orders::payment_status_error, state::State};

/// Provider order the buyer approves in the PayPal widget.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentIntentResponse {
    /// External provider order id
    pub id: String,
}

/// Create Payment Intent Handler
#[endpoint(
    tags("orders"),
    summary = "Create PayPal Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Provider order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is already paid or not payable online"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment provider error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create_payment",
    skip(order, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PaymentIntentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let id = state
        .app
        .payments
        .create_payment_intent(caller, order.into())
        .await
        .map_err(payment_status_error)?;

    Ok(Json(PaymentIntentResponse { id }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        domain::orders::records::OrderUuid,
        payments::{PaymentProviderError, PaymentsServiceError},
    };

    use crate::test_helpers::{Mocks, buyer, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/{order}/create-paypal-order").post(handler)
    }

    #[tokio::test]
    async fn returns_the_provider_order_id() -> TestResult {
        let caller = buyer();
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .payments
            .expect_create_payment_intent()
            .once()
            .withf(move |c, o| *c == caller && *o == uuid)
            .return_once(|_, _| Ok("5O190127TN364715T".to_string()));

        let body: PaymentIntentResponse =
            TestClient::post(format!("http://example.com/orders/{uuid}/create-paypal-order"))
                .send(&service_as(caller, mocks, route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.id, "5O190127TN364715T");

        Ok(())
    }

    #[tokio::test]
    async fn paid_orders_return_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .payments
            .expect_create_payment_intent()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::AlreadyPaid));

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/create-paypal-order",
            Uuid::now_v7()
        ))
        .send(&service_as(buyer(), mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn provider_errors_return_502() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .payments
            .expect_create_payment_intent()
            .once()
            .return_once(|_, _| {
                Err(PaymentsServiceError::Upstream(
                    PaymentProviderError::UnexpectedResponse("no id".to_string()),
                ))
            });

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/create-paypal-order",
            Uuid::now_v7()
        ))
        .send(&service_as(buyer(), mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
