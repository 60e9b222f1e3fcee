//! Order Records

use jiff::Timestamp;
use serde::Serialize;
use storefront::{
    orders::OrderLine, payments::PaymentMethod, pricing::OrderSummary, shipping::ShippingAddress,
    uuids::TypedUuid,
};

use crate::domain::users::records::UserUuid;

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Provider confirmation stored when an order is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentResult {
    /// Provider capture id.
    pub id: String,

    /// Provider status, `COMPLETED` for successful captures.
    pub status: String,

    /// Payer email reported by the provider.
    pub email_address: Option<String>,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub items: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    /// External provider order created for online payment.
    pub payment_intent_id: Option<String>,
    pub payment_result: Option<PaymentResult>,
    pub summary: OrderSummary,
    pub is_paid: bool,
    pub paid_at: Option<Timestamp>,
    pub is_delivered: bool,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Whether `user` placed this order.
    #[must_use]
    pub fn is_owned_by(&self, user: UserUuid) -> bool {
        self.user == user
    }
}
