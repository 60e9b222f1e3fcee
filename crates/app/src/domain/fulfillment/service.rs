//! Fulfillment service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::AdminCaller,
    database::Db,
    domain::{
        fulfillment::errors::FulfillmentServiceError,
        orders::{
            records::{OrderRecord, OrderUuid},
            repository::{OrdersRepository, PgOrdersRepository},
        },
    },
};

#[derive(Clone)]
pub struct PgFulfillmentService {
    repository: Arc<dyn OrdersRepository>,
}

impl PgFulfillmentService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: Arc::new(PgOrdersRepository::new(db)),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_repository(repository: Arc<dyn OrdersRepository>) -> Self {
        Self { repository }
    }

    /// Explain why a conditional update touched no row.
    async fn refused(
        &self,
        order: OrderUuid,
        terminal: FulfillmentServiceError,
    ) -> FulfillmentServiceError {
        match self.repository.get_order(order).await {
            Ok(_) => terminal,
            Err(error) => error.into(),
        }
    }
}

impl std::fmt::Debug for PgFulfillmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgFulfillmentService").finish_non_exhaustive()
    }
}

#[async_trait]
impl FulfillmentService for PgFulfillmentService {
    async fn mark_paid(
        &self,
        admin: AdminCaller,
        order: OrderUuid,
    ) -> Result<OrderRecord, FulfillmentServiceError> {
        match self.repository.mark_paid(order, None).await? {
            Some(paid) => {
                info!(%order, admin = %admin.user(), "marked order paid");

                Ok(paid)
            }
            None => Err(self
                .refused(order, FulfillmentServiceError::AlreadyPaid)
                .await),
        }
    }

    async fn mark_delivered(
        &self,
        admin: AdminCaller,
        order: OrderUuid,
    ) -> Result<OrderRecord, FulfillmentServiceError> {
        match self.repository.mark_delivered(order).await? {
            Some(delivered) => {
                info!(%order, admin = %admin.user(), "marked order delivered");

                Ok(delivered)
            }
            None => Err(self
                .refused(order, FulfillmentServiceError::AlreadyDelivered)
                .await),
        }
    }

    async fn deliver(
        &self,
        admin: AdminCaller,
        order: OrderUuid,
    ) -> Result<OrderRecord, FulfillmentServiceError> {
        let current = self.repository.get_order(order).await?;

        if !current.is_paid {
            self.mark_paid(admin, order).await?;
        }

        self.mark_delivered(admin, order).await
    }
}

#[automock]
#[async_trait]
pub trait FulfillmentService: Send + Sync {
    /// Record payment. `paid_at` is set once and never moves.
    async fn mark_paid(
        &self,
        admin: AdminCaller,
        order: OrderUuid,
    ) -> Result<OrderRecord, FulfillmentServiceError>;

    /// Record delivery. `delivered_at` is set once and never moves.
    async fn mark_delivered(
        &self,
        admin: AdminCaller,
        order: OrderUuid,
    ) -> Result<OrderRecord, FulfillmentServiceError>;

    /// Mark an unpaid order paid, then delivered. Stops at the first failure.
    async fn deliver(
        &self,
        admin: AdminCaller,
        order: OrderUuid,
    ) -> Result<OrderRecord, FulfillmentServiceError>;
}


#[cfg(test)]
mod database_tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{create_admin, create_product, create_user, place_order},
    };

    use super::*;

    #[tokio::test]
    async fn paying_twice_keeps_the_first_payment_time() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_admin(&ctx).await;
        let buyer = create_user(&ctx, "buyer@example.com", false).await;
        let tote = create_product(&ctx, "canvas-tote").await;
        let order = place_order(&ctx, buyer, tote.uuid).await;

        let paid = ctx.fulfillment.mark_paid(admin, order.uuid).await?;
        let paid_at = paid.paid_at.ok_or("paid_at should be set")?;

        let again = ctx.fulfillment.mark_paid(admin, order.uuid).await;

        assert!(matches!(again, Err(FulfillmentServiceError::AlreadyPaid)));

        let stored = ctx.orders_repository.get_order(order.uuid).await?;

        assert!(stored.is_paid);
        assert_eq!(stored.paid_at, Some(paid_at));

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_payments_succeed_exactly_once() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_admin(&ctx).await;
        let buyer = create_user(&ctx, "buyer@example.com", false).await;
        let tote = create_product(&ctx, "canvas-tote").await;
        let order = place_order(&ctx, buyer, tote.uuid).await;

        let first = tokio::spawn({
            let service = ctx.fulfillment.clone();
            async move { service.mark_paid(admin, order.uuid).await }
        });
        let second = tokio::spawn({
            let service = ctx.fulfillment.clone();
            async move { service.mark_paid(admin, order.uuid).await }
        });

        let outcomes = [first.await?, second.await?];

        let succeeded = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        let refused = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Err(FulfillmentServiceError::AlreadyPaid)))
            .count();

        assert_eq!(succeeded, 1);
        assert_eq!(refused, 1);

        Ok(())
    }

    #[tokio::test]
    async fn missing_orders_are_not_found() {
        let ctx = TestContext::new().await;
        let admin = create_admin(&ctx).await;

        let result = ctx.fulfillment.mark_paid(admin, OrderUuid::new()).await;

        assert!(matches!(result, Err(FulfillmentServiceError::NotFound)));
    }

    #[tokio::test]
    async fn deliver_records_payment_before_delivery() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_admin(&ctx).await;
        let buyer = create_user(&ctx, "buyer@example.com", false).await;
        let tote = create_product(&ctx, "canvas-tote").await;
        let order = place_order(&ctx, buyer, tote.uuid).await;

        let delivered = ctx.fulfillment.deliver(admin, order.uuid).await?;

        let paid_at = delivered.paid_at.ok_or("paid_at should be set")?;
        let delivered_at = delivered.delivered_at.ok_or("delivered_at should be set")?;

        assert!(delivered.is_paid && delivered.is_delivered);
        assert!(paid_at <= delivered_at);

        let again = ctx.fulfillment.deliver(admin, order.uuid).await;

        assert!(matches!(
            again,
            Err(FulfillmentServiceError::AlreadyDelivered)
        ));

        Ok(())
    }
}
