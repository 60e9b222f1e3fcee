//! Products Data

use storefront::prices::Price;

use crate::domain::products::{ProductsServiceError, records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub details: ProductDetails,
}

/// Editable catalog fields shared by creation and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
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
}

impl ProductDetails {
    /// Check the fields the database would otherwise reject.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::MissingRequiredData`] for blank fields
    /// and [`ProductsServiceError::InvalidData`] for a malformed slug.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        let required = [&self.name, &self.slug, &self.category, &self.brand];

        if required.iter().any(|value| value.trim().is_empty()) || self.images.is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let slug_ok = self
            .slug
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));

        if !slug_ok {
            return Err(ProductsServiceError::InvalidData);
        }

        Ok(())
    }
}
