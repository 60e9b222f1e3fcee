//! Order submission gateway and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use storefront::{
    orders::OrderDraft,
    prices::Price,
    products::{Product, ProductUuid},
};
use tracing::debug;
use uuid::Uuid;

use crate::errors::GatewayError;

/// An order as the API reports it. Amounts are in cents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacedOrder {
    /// Order identifier assigned by the client.
    pub uuid: Uuid,

    /// Display name of the chosen payment method.
    pub payment_method: String,

    pub items_price: u64,
    pub shipping_price: u64,
    pub tax_price: u64,
    pub total_price: u64,

    /// Whether payment has been recorded.
    pub is_paid: bool,

    /// RFC 3339 payment time.
    pub paid_at: Option<String>,

    /// Whether the order has been handed over.
    pub is_delivered: bool,

    /// RFC 3339 delivery time.
    pub delivered_at: Option<String>,

    /// RFC 3339 placement time.
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
struct ProductBody {
    uuid: Uuid,
    name: String,
    slug: String,
    price: u64,
    images: Vec<String>,
}

impl From<ProductBody> for Product {
    fn from(body: ProductBody) -> Self {
        Product {
            uuid: body.uuid.into(),
            name: body.name,
            slug: body.slug,
            price: Price::from_minor(body.price),
            images: body.images,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrdersBody {
    orders: Vec<PlacedOrder>,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentBody {
    id: String,
}

/// Calls the client makes against the storefront API.
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Current catalog entry for a product.
    async fn fetch_product(&self, product: ProductUuid) -> Result<Product, GatewayError>;

    /// Place an order. The server reprices every line.
    async fn place_order(&self, draft: &OrderDraft) -> Result<PlacedOrder, GatewayError>;

    /// The shopper's orders, newest first.
    async fn my_orders(&self) -> Result<Vec<PlacedOrder>, GatewayError>;

    /// Open a PayPal order for an unpaid order, returning its id.
    async fn create_payment(&self, order: Uuid) -> Result<String, GatewayError>;

    /// Capture an approved PayPal order.
    async fn capture_payment(
        &self,
        order: Uuid,
        approval: &str,
    ) -> Result<PlacedOrder, GatewayError>;
}

/// [`OrderGateway`] over the JSON API with bearer authentication.
#[derive(Clone)]
pub struct HttpOrderGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpOrderGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOrderGateway")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl HttpOrderGateway {
    /// Build a gateway for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.trim().is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, GatewayError> {
        let token = self.token.as_deref().ok_or(GatewayError::MissingToken)?;

        Ok(request.bearer_auth(token))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();

            debug!(%status, "storefront api rejected request");

            return Err(GatewayError::Rejected { status, message });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn fetch_product(&self, product: ProductUuid) -> Result<Product, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("/products/{product}")))
            .send()
            .await?;

        Ok(Self::decode::<ProductBody>(response).await?.into())
    }

    async fn place_order(&self, draft: &OrderDraft) -> Result<PlacedOrder, GatewayError> {
        let response = self
            .authorized(self.client.post(self.url("/orders")))?
            .json(draft)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn my_orders(&self) -> Result<Vec<PlacedOrder>, GatewayError> {
        let response = self
            .authorized(self.client.get(self.url("/orders/mine")))?
            .send()
            .await?;

        Ok(Self::decode::<OrdersBody>(response).await?.orders)
    }

    async fn create_payment(&self, order: Uuid) -> Result<String, GatewayError> {
        let url = self.url(&format!("/orders/{order}/create-paypal-order"));
        let response = self.authorized(self.client.post(url))?.send().await?;

        Ok(Self::decode::<PaymentIntentBody>(response).await?.id)
    }

    async fn capture_payment(
        &self,
        order: Uuid,
        approval: &str,
    ) -> Result<PlacedOrder, GatewayError> {
        let url = self.url(&format!("/orders/{order}/capture-paypal-order"));
        let response = self
            .authorized(self.client.post(url))?
            .json(&json!({ "orderID": approval }))
            .send()
            .await?;

        Self::decode(response).await
    }
}
