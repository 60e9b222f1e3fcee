//! Order request and response bodies.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::{
    orders::OrderLine,
    payments::{PaymentMethod, UnknownPaymentMethod},
    shipping::ShippingAddress,
};
use storefront_app::domain::orders::{
    data::{NewOrder, NewOrderItem},
    records::{OrderRecord, PaymentResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressBody {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        ShippingAddress {
            full_name: body.full_name,
            address: body.address,
            city: body.city,
            postal_code: body.postal_code,
            country: body.country,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        ShippingAddressBody {
            full_name: address.full_name,
            address: address.address,
            city: address.city,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

/// A requested line. Any name or price sent alongside is ignored; the
/// catalog is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    /// Product UUID
    pub product: Uuid,

    /// Units ordered, at least 1
    pub qty: u32,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub size: Option<String>,
}

/// Create Order Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub shipping_address: ShippingAddressBody,

    /// `PayPal`, `Stripe` or `CashOnDelivery`
    pub payment_method: String,

    pub items: Vec<OrderItemRequest>,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = UnknownPaymentMethod;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        Ok(NewOrder {
            shipping_address: request.shipping_address.into(),
            payment_method: request.payment_method.parse::<PaymentMethod>()?,
            items: request
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: item.product.into(),
                    qty: item.qty,
                    color: item.color,
                    size: item.size,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product: Uuid,
    pub name: String,
    pub slug: String,
    pub qty: u32,

    /// Unit price in cents at the time of ordering
    pub price: u64,

    pub images: Vec<String>,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        OrderLineResponse {
            product: line.product.into(),
            name: line.name,
            slug: line.slug,
            qty: line.qty,
            price: line.price.to_minor_units(),
            images: line.images,
            color: line.color,
            size: line.size,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResultResponse {
    pub id: String,
    pub status: String,
    pub email_address: Option<String>,
}

impl From<PaymentResult> for PaymentResultResponse {
    fn from(result: PaymentResult) -> Self {
        PaymentResultResponse {
            id: result.id,
            status: result.status,
            email_address: result.email_address,
        }
    }
}

/// Order Response. Amounts are in cents.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user: Uuid,
    pub items: Vec<OrderLineResponse>,
    pub shipping_address: ShippingAddressBody,
    pub payment_method: String,
    pub payment_result: Option<PaymentResultResponse>,
    pub items_price: u64,
    pub shipping_price: u64,
    pub tax_price: u64,
    pub total_price: u64,
    pub is_paid: bool,
    pub paid_at: Option<String>,
    pub is_delivered: bool,
    pub delivered_at: Option<String>,
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user: order.user.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method.to_string(),
            payment_result: order.payment_result.map(Into::into),
            items_price: order.summary.items_price.to_minor_units(),
            shipping_price: order.summary.shipping_price.to_minor_units(),
            tax_price: order.summary.tax_price.to_minor_units(),
            total_price: order.summary.total_price.to_minor_units(),
            is_paid: order.is_paid,
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
            is_delivered: order.is_delivered,
            delivered_at: order.delivered_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        OrdersResponse {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}
