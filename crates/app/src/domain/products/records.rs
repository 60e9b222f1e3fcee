//! Product Records

use jiff::Timestamp;
use storefront::{prices::Price, products::Product};

pub use storefront::products::ProductUuid;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub brand: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: Price,
    pub count_in_stock: u32,
    pub is_featured: bool,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            uuid: record.uuid,
            name: record.name,
            slug: record.slug,
            price: record.price,
            images: record.images,
        }
    }
}
