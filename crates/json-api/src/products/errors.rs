//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A product with this slug already exists")
        }
        ProductsServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Product name, slug, category, brand and an image are required")
        }
        ProductsServiceError::InvalidData => StatusError::bad_request()
            .brief("Product slug must be lowercase words separated by single hyphens"),
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
