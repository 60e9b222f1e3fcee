//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Delete Product Handler
///
/// Soft-deletes the product. Existing orders keep their copied lines.
#[endpoint(
    tags("admin"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Administrator access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.delete", skip(product, depot), err)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;
    let product = product.into_inner();

    state
        .app
        .products
        .delete_product(product.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, admin = %admin.user(), "deleted product");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::products::{ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{Mocks, admin, buyer, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/products/{product}").delete(handler)
    }

    #[tokio::test]
    async fn deletes_the_product() -> TestResult {
        let uuid = ProductUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .products
            .expect_delete_product()
            .once()
            .withf(move |p| *p == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/admin/products/{uuid}"))
            .send(&service_as(admin(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn missing_products_return_404() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/admin/products/{}", Uuid::now_v7()))
            .send(&service_as(admin(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn buyers_cannot_delete_products() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.products.expect_delete_product().never();

        let res = TestClient::delete(format!("http://example.com/admin/products/{}", Uuid::now_v7()))
            .send(&service_as(buyer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
