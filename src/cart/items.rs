//! Cart items

use serde::{Deserialize, Serialize};

use crate::{
    prices::Price,
    pricing::PricedLine,
    products::{Product, ProductUuid},
};

/// A product variant chosen by the shopper, with its unit price snapshotted
/// at the time it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product UUID
    pub product: ProductUuid,

    /// Display name
    pub name: String,

    /// Product slug
    pub slug: String,

    /// Unit price when added
    pub price: Price,

    /// Quantity, never below 1 while the item is in a cart
    pub qty: u32,

    /// Chosen color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Chosen size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,
}

impl CartItem {
    /// A single unit of a product with no variant chosen.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product: product.uuid,
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.price,
            qty: 1,
            color: None,
            size: None,
            images: product.images.clone(),
        }
    }

    /// Set the color variant.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the size variant.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Whether two items are the same product variant.
    pub fn same_variant(&self, other: &CartItem) -> bool {
        self.key() == other.key()
    }

    fn key(&self) -> (&str, Option<&str>, Option<&str>) {
        (&self.slug, self.color.as_deref(), self.size.as_deref())
    }
}

impl PricedLine for CartItem {
    fn unit_price(&self) -> Price {
        self.price
    }

    fn quantity(&self) -> u32 {
        self.qty
    }
}
