//! Payment provider seam.

use async_trait::async_trait;
use mockall::automock;
use storefront::prices::Price;
use thiserror::Error;

use crate::domain::orders::records::OrderUuid;

/// Provider status of a successful capture.
pub const CAPTURE_COMPLETED: &str = "COMPLETED";

/// Provider response to a capture request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Provider order id.
    pub id: String,

    /// Provider status, [`CAPTURE_COMPLETED`] on success.
    pub status: String,

    /// Payer email when the provider reports one.
    pub payer_email: Option<String>,
}

/// Errors that can occur when talking to a payment provider.
#[derive(Debug, Error)]
pub enum PaymentProviderError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment provider: {0}")]
    UnexpectedResponse(String),

    /// The amount cannot be expressed to the provider.
    #[error("amount out of range")]
    Amount,
}

#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Open a provider order for `amount`, returning its external id.
    async fn create_order(
        &self,
        amount: Price,
        reference: OrderUuid,
    ) -> Result<String, PaymentProviderError>;

    /// Capture an approved provider order.
    async fn capture_order(&self, external_id: &str)
    -> Result<CaptureOutcome, PaymentProviderError>;
}
