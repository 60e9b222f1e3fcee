//! Order Data

use storefront::{
    orders::OrderLine, payments::PaymentMethod, pricing::OrderSummary, products::ProductUuid,
    shipping::ShippingAddress,
};

use crate::domain::{orders::records::OrderUuid, users::records::UserUuid};

/// A requested order line. Only identity and quantity are trusted; names and
/// prices come from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub qty: u32,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// A place-order request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub items: Vec<NewOrderItem>,
}

/// A fully priced order ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewOrderRecord {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub items: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub summary: OrderSummary,
}
