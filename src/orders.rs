//! Order drafts
//!
//! An [`OrderDraft`] is the request a shopper sends to place an order. Its
//! prices are informational: the server re-prices every line from the
//! catalog and never persists client-supplied prices.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartItem},
    payments::PaymentMethod,
    prices::{Price, PriceError},
    pricing::{PricedLine, PricingError, PricingPolicy},
    products::ProductUuid,
    shipping::ShippingAddress,
};

/// Reasons a cart cannot be turned into an order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderDraftError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// No shipping address saved.
    #[error("shipping address is required")]
    MissingShippingAddress,

    /// No payment method chosen.
    #[error("payment method is required")]
    MissingPaymentMethod,

    /// Some items carry an identifier that cannot refer to a product.
    #[error("some items have invalid IDs: {}", slugs.join(", "))]
    InvalidItems {
        /// Slugs of the offending items
        slugs: Vec<String>,
    },

    /// Totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product UUID
    pub product: ProductUuid,

    /// Product name
    pub name: String,

    /// Product slug
    pub slug: String,

    /// Quantity
    pub qty: u32,

    /// Unit price
    pub price: Price,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,

    /// Chosen color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Chosen size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product: item.product,
            name: item.name.clone(),
            slug: item.slug.clone(),
            qty: item.qty,
            price: item.price,
            images: item.images.clone(),
            color: item.color.clone(),
            size: item.size.clone(),
        }
    }
}

impl PricedLine for OrderLine {
    fn unit_price(&self) -> Price {
        self.price
    }

    fn quantity(&self) -> u32 {
        self.qty
    }
}

/// The place-order request built from a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Shipping address
    pub shipping_address: ShippingAddress,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Lines
    pub items: Vec<OrderLine>,

    /// Items price as the client computed it
    pub items_price: Price,

    /// Shipping price as the client computed it
    pub shipping_price: Price,

    /// Tax as the client computed it
    pub tax_price: Price,

    /// Total as the client computed it
    pub total_price: Price,
}

impl OrderDraft {
    /// Build a draft from a cart.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderDraftError`] if the cart is empty, lacks a shipping
    /// address or payment method, holds items with a nil product id, or its
    /// totals overflow.
    pub fn from_cart(cart: &Cart, policy: &PricingPolicy) -> Result<Self, OrderDraftError> {
        if cart.is_empty() {
            return Err(OrderDraftError::EmptyCart);
        }

        let shipping_address = cart
            .shipping_address
            .clone()
            .ok_or(OrderDraftError::MissingShippingAddress)?;

        let payment_method = cart
            .payment_method
            .ok_or(OrderDraftError::MissingPaymentMethod)?;

        let invalid: Vec<String> = cart
            .items
            .iter()
            .filter(|item| item.product.is_nil())
            .map(|item| item.slug.clone())
            .collect();

        if !invalid.is_empty() {
            return Err(OrderDraftError::InvalidItems { slugs: invalid });
        }

        let summary = cart.summary(policy)?;

        Ok(Self {
            shipping_address,
            payment_method,
            items: cart.items.iter().map(OrderLine::from).collect(),
            items_price: summary.items_price,
            shipping_price: summary.shipping_price,
            tax_price: summary.tax_price,
            total_price: summary.total_price,
        })
    }
}

/// Merge lines for the same product variant, summing their quantities.
///
/// The first occurrence keeps its position; later duplicates fold into it.
///
/// # Errors
///
/// Returns [`PricingError`] if a merged quantity exceeds `u32::MAX`.
pub fn merge_lines(lines: Vec<OrderLine>) -> Result<Vec<OrderLine>, PricingError> {
    let mut merged: Vec<OrderLine> = Vec::with_capacity(lines.len());
    let mut index: FxHashMap<(ProductUuid, Option<String>, Option<String>), usize> =
        FxHashMap::default();

    for line in lines {
        let key = (line.product, line.color.clone(), line.size.clone());

        match index.get(&key).and_then(|&i| merged.get_mut(i)) {
            Some(existing) => {
                existing.qty = existing
                    .qty
                    .checked_add(line.qty)
                    .ok_or(PricingError::Price(PriceError::Overflow))?;
            }
            None => {
                index.insert(key, merged.len());
                merged.push(line);
            }
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Margaret Hamilton".to_string(),
            address: "77 Massachusetts Avenue".to_string(),
            city: "Cambridge".to_string(),
            postal_code: "02139".to_string(),
            country: "United States".to_string(),
        }
    }

    fn item(slug: &str, minor: u64, qty: u32) -> CartItem {
        CartItem {
            product: ProductUuid::new(),
            name: slug.to_string(),
            slug: slug.to_string(),
            price: Price::from_minor(minor),
            qty,
            color: None,
            size: None,
            images: vec![format!("/images/{slug}.jpg")],
        }
    }

    fn cart(items: Vec<CartItem>) -> Cart {
        Cart {
            items: items.into_iter().collect(),
            shipping_address: Some(address()),
            payment_method: Some(PaymentMethod::CashOnDelivery),
        }
    }

    #[test]
    fn draft_carries_lines_and_summary() -> TestResult {
        let cart = cart(vec![item("boots", 5_000, 2)]);

        let draft = OrderDraft::from_cart(&cart, &PricingPolicy::default())?;

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items.first().map(|l| l.qty), Some(2));
        assert_eq!(draft.items_price, Price::from_major(100));
        assert_eq!(draft.shipping_price, Price::from_major(250));
        assert_eq!(draft.total_price, Price::from_major(350));
        assert_eq!(draft.payment_method, PaymentMethod::CashOnDelivery);

        Ok(())
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert_eq!(
            OrderDraft::from_cart(&cart(Vec::new()), &PricingPolicy::default()),
            Err(OrderDraftError::EmptyCart)
        );
    }

    #[test]
    fn missing_prerequisites_are_rejected() {
        let no_address = Cart {
            shipping_address: None,
            ..cart(vec![item("boots", 5_000, 1)])
        };
        let no_method = Cart {
            payment_method: None,
            ..cart(vec![item("boots", 5_000, 1)])
        };

        assert_eq!(
            OrderDraft::from_cart(&no_address, &PricingPolicy::default()),
            Err(OrderDraftError::MissingShippingAddress)
        );
        assert_eq!(
            OrderDraft::from_cart(&no_method, &PricingPolicy::default()),
            Err(OrderDraftError::MissingPaymentMethod)
        );
    }

    #[test]
    fn nil_product_ids_are_rejected() {
        let broken = CartItem {
            product: ProductUuid::from_uuid(Uuid::nil()),
            ..item("ghost", 100, 1)
        };

        let result = OrderDraft::from_cart(
            &cart(vec![item("boots", 5_000, 1), broken]),
            &PricingPolicy::default(),
        );

        assert_eq!(
            result,
            Err(OrderDraftError::InvalidItems {
                slugs: vec!["ghost".to_string()]
            })
        );
    }

    #[test]
    fn merge_lines_sums_duplicate_variants() -> TestResult {
        let boots = OrderLine::from(&item("boots", 5_000, 1));
        let red_boots = OrderLine {
            color: Some("red".to_string()),
            ..boots.clone()
        };
        let hat = OrderLine::from(&item("hat", 1_000, 1));

        let merged = merge_lines(vec![
            boots.clone(),
            hat.clone(),
            OrderLine { qty: 2, ..boots.clone() },
            red_boots.clone(),
        ])?;

        assert_eq!(merged, vec![OrderLine { qty: 3, ..boots }, hat, red_boots]);

        Ok(())
    }

    #[test]
    fn merge_lines_overflow_is_an_error() {
        let line = OrderLine::from(&item("boots", 5_000, u32::MAX));

        assert!(merge_lines(vec![line.clone(), line]).is_err());
    }
}
