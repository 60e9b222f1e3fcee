//! Product request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::prices::Price;
use storefront_app::domain::products::{data::ProductDetails, records::ProductRecord};

/// Catalog fields accepted when creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub brand: String,
    #[serde(default)]
    pub description: String,
    pub images: Vec<String>,

    /// Unit price in cents
    pub price: u64,

    #[serde(default)]
    pub count_in_stock: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl From<ProductRequest> for ProductDetails {
    fn from(request: ProductRequest) -> Self {
        ProductDetails {
            name: request.name,
            slug: request.slug,
            category: request.category,
            brand: request.brand,
            description: request.description,
            images: request.images,
            price: Price::from_minor(request.price),
            count_in_stock: request.count_in_stock,
            is_featured: request.is_featured,
            colors: request.colors,
            sizes: request.sizes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub brand: String,
    pub description: String,
    pub images: Vec<String>,

    /// Unit price in cents
    pub price: u64,

    pub count_in_stock: u32,
    pub is_featured: bool,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            slug: product.slug,
            category: product.category,
            brand: product.brand,
            description: product.description,
            images: product.images,
            price: product.price.to_minor_units(),
            count_in_stock: product.count_in_stock,
            is_featured: product.is_featured,
            colors: product.colors,
            sizes: product.sizes,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}
