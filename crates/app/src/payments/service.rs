//! Payments service.
//!
//! Opening a provider order and capturing it are separate calls. A failed
//! capture leaves the order unpaid, so the buyer can retry.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::payments::PaymentMethod;
use tracing::{info, warn};

use crate::{
    auth::Caller,
    database::Db,
    domain::orders::{
        records::{OrderRecord, OrderUuid, PaymentResult},
        repository::{OrdersRepository, PgOrdersRepository},
    },
    payments::{CAPTURE_COMPLETED, PaymentProvider, PaymentsServiceError},
};

#[derive(Clone)]
pub struct PgPaymentsService {
    repository: Arc<dyn OrdersRepository>,
    provider: Arc<dyn PaymentProvider>,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, provider: Arc<dyn PaymentProvider>) -> Self {
        Self {
            repository: Arc::new(PgOrdersRepository::new(db)),
            provider,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_repository(
        repository: Arc<dyn OrdersRepository>,
        provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// Load an unpaid order belonging to the caller.
    async fn payable_order(
        &self,
        caller: Caller,
        order: OrderUuid,
    ) -> Result<OrderRecord, PaymentsServiceError> {
        let record = self.repository.get_order(order).await?;

        if !record.is_owned_by(caller.user) {
            return Err(PaymentsServiceError::NotFound);
        }

        if record.is_paid {
            return Err(PaymentsServiceError::AlreadyPaid);
        }

        Ok(record)
    }
}

impl std::fmt::Debug for PgPaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPaymentsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    async fn create_payment_intent(
        &self,
        caller: Caller,
        order: OrderUuid,
    ) -> Result<String, PaymentsServiceError> {
        let record = self.payable_order(caller, order).await?;

        if record.payment_method != PaymentMethod::PayPal {
            return Err(PaymentsServiceError::UnsupportedPaymentMethod);
        }

        let intent = self
            .provider
            .create_order(record.summary.total_price, order)
            .await?;

        self.repository
            .set_payment_intent(order, intent.clone())
            .await?
            .ok_or(PaymentsServiceError::AlreadyPaid)?;

        info!(%order, %intent, "created payment intent");

        Ok(intent)
    }

    async fn capture_payment(
        &self,
        caller: Caller,
        order: OrderUuid,
        approval: String,
    ) -> Result<OrderRecord, PaymentsServiceError> {
        let record = self.payable_order(caller, order).await?;

        let intent = record
            .payment_intent_id
            .ok_or(PaymentsServiceError::MissingIntent)?;

        if intent != approval {
            return Err(PaymentsServiceError::IntentMismatch);
        }

        let outcome = self.provider.capture_order(&approval).await?;

        if outcome.status != CAPTURE_COMPLETED {
            warn!(%order, status = %outcome.status, "payment capture not completed");

            return Err(PaymentsServiceError::PaymentNotCompleted {
                status: outcome.status,
            });
        }

        let paid = self
            .repository
            .mark_paid(
                order,
                Some(PaymentResult {
                    id: outcome.id,
                    status: outcome.status,
                    email_address: outcome.payer_email,
                }),
            )
            .await?
            .ok_or(PaymentsServiceError::AlreadyPaid)?;

        info!(%order, "captured payment");

        Ok(paid)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Open a provider order for the caller's unpaid order and remember its id.
    async fn create_payment_intent(
        &self,
        caller: Caller,
        order: OrderUuid,
    ) -> Result<String, PaymentsServiceError>;

    /// Capture the approved provider order and mark the order paid.
    async fn capture_payment(
        &self,
        caller: Caller,
        order: OrderUuid,
        approval: String,
    ) -> Result<OrderRecord, PaymentsServiceError>;
}
