//! Capture Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    observability::record_payment_captured,
    orders::{models::OrderResponse, payment_status_error},
    state::State,
};

/// Approval returned by the PayPal widget.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CapturePaymentRequest {
    /// External provider order id the buyer approved
    #[serde(rename = "orderID")]
    pub order_id: String,
}

/// Capture Payment Handler
///
/// Captures the approved provider order and marks the order paid.
#[endpoint(
    tags("orders"),
    summary = "Capture PayPal Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order paid"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is already paid or the approval does not match"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment provider error or incomplete capture"),
    ),
)]
#[tracing::instrument(
    name = "orders.capture_payment",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<CapturePaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let paid = state
        .app
        .payments
        .capture_payment(caller, order.into(), json.into_inner().order_id)
        .await
        .map_err(payment_status_error)?;

    record_payment_captured();

    Ok(Json(paid.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        domain::orders::records::{OrderUuid, PaymentResult},
        payments::PaymentsServiceError,
    };

    use crate::test_helpers::{Mocks, buyer, make_order, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/{order}/capture-paypal-order").post(handler)
    }

    #[tokio::test]
    async fn marks_the_order_paid() -> TestResult {
        let caller = buyer();
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .payments
            .expect_capture_payment()
            .once()
            .withf(move |c, o, approval| *c == caller && *o == uuid && approval == "5O190127TN364715T")
            .return_once(move |c, o, approval| {
                let mut order = make_order(o, c.user);

                order.is_paid = true;
                order.paid_at = Some(Timestamp::UNIX_EPOCH);
                order.payment_intent_id = Some(approval);
                order.payment_result = Some(PaymentResult {
                    id: "3C679366HH908993F".to_string(),
                    status: "COMPLETED".to_string(),
                    email_address: Some("buyer@example.com".to_string()),
                });

                Ok(order)
            });

        let body: OrderResponse =
            TestClient::post(format!("http://example.com/orders/{uuid}/capture-paypal-order"))
                .json(&json!({ "orderID": "5O190127TN364715T" }))
                .send(&service_as(caller, mocks, route()))
                .await
                .take_json()
                .await?;

        assert!(body.is_paid);
        assert_eq!(
            body.payment_result.map(|result| result.status),
            Some("COMPLETED".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn mismatched_approvals_return_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .payments
            .expect_capture_payment()
            .once()
            .return_once(|_, _, _| Err(PaymentsServiceError::IntentMismatch));

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/capture-paypal-order",
            Uuid::now_v7()
        ))
        .json(&json!({ "orderID": "someone-elses" }))
        .send(&service_as(buyer(), mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn incomplete_captures_return_502() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .payments
            .expect_capture_payment()
            .once()
            .return_once(|_, _, _| {
                Err(PaymentsServiceError::PaymentNotCompleted {
                    status: "PENDING".to_string(),
                })
            });

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/capture-paypal-order",
            Uuid::now_v7()
        ))
        .json(&json!({ "orderID": "5O190127TN364715T" }))
        .send(&service_as(buyer(), mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }

    #[tokio::test]
    async fn missing_approval_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.payments.expect_capture_payment().never();

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/capture-paypal-order",
            Uuid::now_v7()
        ))
        .json(&json!({}))
        .send(&service_as(buyer(), mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
