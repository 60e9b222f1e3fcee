//! Products

use serde::{Deserialize, Serialize};

use crate::{prices::Price, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// The catalog view of a product: what a cart line or order line snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product UUID
    pub uuid: ProductUuid,

    /// Product name
    pub name: String,

    /// URL slug, unique across the catalog
    pub slug: String,

    /// Unit price
    pub price: Price,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,
}
