//! Single-flight order placement.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use storefront::{
    cart::{CartStorage, CartStore},
    orders::OrderDraft,
    pricing::PricingPolicy,
};
use tracing::info;

use crate::{
    errors::SubmitError,
    gateway::{OrderGateway, PlacedOrder},
};

/// Places the cart as an order, at most one submission at a time.
///
/// The cart is cleared only once the server has accepted the order. On any
/// failure it is left untouched so the shopper can retry.
pub struct OrderSubmitter {
    gateway: Arc<dyn OrderGateway>,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for OrderSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSubmitter")
            .field("in_flight", &self.is_submitting())
            .finish_non_exhaustive()
    }
}

/// Releases the submission slot when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl OrderSubmitter {
    /// Submitter placing orders through `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently running.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_current| SubmitError::SubmissionInFlight)?;

        Ok(InFlight(&self.in_flight))
    }

    /// Build a draft from the cart, place it and clear the cart.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::SubmissionInFlight`] if another submission has
    /// not finished, a draft error if the cart is incomplete, or the gateway
    /// error if the server refused the order.
    pub async fn submit<S: CartStorage>(
        &self,
        store: &mut CartStore<S>,
        policy: &PricingPolicy,
    ) -> Result<PlacedOrder, SubmitError> {
        let _in_flight = self.begin()?;

        let draft = OrderDraft::from_cart(store.cart(), policy)?;
        let placed = self.gateway.place_order(&draft).await?;

        info!(order = %placed.uuid, total = placed.total_price, "order placed");

        store.clear()?;

        Ok(placed)
    }
}
