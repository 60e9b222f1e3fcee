//! PayPal Orders v2 client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use storefront::prices::{Price, STORE_CURRENCY};

use crate::{
    domain::orders::records::OrderUuid,
    payments::{CaptureOutcome, PaymentProvider, PaymentProviderError},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to PayPal.
#[derive(Clone)]
pub struct PayPalConfig {
    /// API base, e.g. `"https://api-m.sandbox.paypal.com"`.
    pub api_url: String,

    /// REST application client id.
    pub client_id: String,

    /// REST application secret.
    pub client_secret: String,
}

impl std::fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("api_url", &self.api_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"**redacted**")
            .finish()
    }
}

/// HTTP client for PayPal checkout orders.
#[derive(Debug, Clone)]
pub struct PayPalClient {
    config: PayPalConfig,
    http: Client,
}

impl PayPalClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: PayPalConfig) -> Result<Self, PaymentProviderError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url.trim_end_matches('/'))
    }

    /// Client-credentials access token. Fetched per call; no caching.
    async fn access_token(&self) -> Result<String, PaymentProviderError> {
        let response = self
            .http
            .post(self.url("/v1/oauth2/token"))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let parsed: TokenResponse = success(response, "token").await?.json().await?;

        Ok(parsed.access_token)
    }
}

#[async_trait]
impl PaymentProvider for PayPalClient {
    async fn create_order(
        &self,
        amount: Price,
        reference: OrderUuid,
    ) -> Result<String, PaymentProviderError> {
        let value = amount
            .to_decimal()
            .map_err(|_overflow| PaymentProviderError::Amount)?;

        let body = CreateOrderRequest {
            intent: "CAPTURE",
            purchase_units: [PurchaseUnit {
                reference_id: reference.to_string(),
                amount: Amount {
                    currency_code: STORE_CURRENCY.iso_alpha_code,
                    value: value.to_string(),
                },
            }],
        };

        let token = self.access_token().await?;

        let response = self
            .http
            .post(self.url("/v2/checkout/orders"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let parsed: OrderResponse = success(response, "create order").await?.json().await?;

        Ok(parsed.id)
    }

    async fn capture_order(
        &self,
        external_id: &str,
    ) -> Result<CaptureOutcome, PaymentProviderError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(self.url(&format!("/v2/checkout/orders/{external_id}/capture")))
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await?;

        let parsed: CaptureResponse = success(response, "capture order").await?.json().await?;

        Ok(CaptureOutcome {
            id: parsed.id,
            status: parsed.status,
            payer_email: parsed.payer.and_then(|payer| payer.email_address),
        })
    }
}

async fn success(response: Response, operation: &str) -> Result<Response, PaymentProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    Err(PaymentProviderError::UnexpectedResponse(format!(
        "{operation} request failed with status {status}: {text}"
    )))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    intent: &'static str,
    purchase_units: [PurchaseUnit; 1],
}

#[derive(Debug, Serialize)]
struct PurchaseUnit {
    reference_id: String,
    amount: Amount,
}

#[derive(Debug, Serialize)]
struct Amount {
    currency_code: &'static str,
    value: String,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CaptureResponse {
    id: String,
    status: String,
    payer: Option<Payer>,
}

#[derive(Debug, Deserialize)]
struct Payer {
    email_address: Option<String>,
}
