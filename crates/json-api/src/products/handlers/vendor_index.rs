//! Vendor Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use rentreturn_app::domain::users::records::Role;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, models::ProductsEnvelope},
    state::State,
};

/// Vendor Product Index Handler
///
/// Returns the calling vendor's own listings, whatever their status.
#[endpoint(
    tags("vendor"),
    summary = "List My Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;

    let products = state
        .app
        .products
        .list_vendor_products(vendor.uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(products.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use rentreturn_app::domain::products::{MockProductsService, records::ProductUuid};

    use crate::test_helpers::{make_product, make_user, products_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("vendor/products").get(handler)
    }

    #[tokio::test]
    async fn test_vendor_index_scopes_to_caller() -> TestResult {
        let vendor = make_user(Role::Vendor);
        let vendor_uuid = vendor.uuid;
        let listed = vec![make_product(ProductUuid::new(), &vendor)];

        let mut products = MockProductsService::new();

        products
            .expect_list_vendor_products()
            .once()
            .withf(move |owner| *owner == vendor_uuid)
            .return_once(move |_| Ok(listed));

        let response: ProductsEnvelope = TestClient::get("http://example.com/vendor/products")
            .send(&products_service(products, Some(vendor), route()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].vendor_uuid, vendor_uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_index_rejects_renters() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_vendor_products().never();

        let res = TestClient::get("http://example.com/vendor/products")
            .send(&products_service(products, Some(make_user(Role::User)), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_index_requires_authentication() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_vendor_products().never();

        let res = TestClient::get("http://example.com/vendor/products")
            .send(&products_service(products, None, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
