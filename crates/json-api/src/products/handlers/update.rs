//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use rentreturn_app::domain::{products::records::ProductUuid, users::records::Role};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, models::ProductEnvelope, requests::ProductRequest},
    state::State,
};

/// Product Update Handler
///
/// Replaces the listing fields of one of the caller's products. The status
/// may move between `available` and `maintenance`.
#[endpoint(
    tags("vendor"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(
        vendor_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        price_per_day = tracing::field::Empty
    ),
    err(Debug)
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;
    let product = ProductUuid::from_uuid(product.into_inner());
    let update = json.into_inner().into_update()?;

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor.uuid));
    span.record("product_uuid", tracing::field::display(product));
    span.record("price_per_day", tracing::field::display(update.price_per_day));

    let updated = state
        .app
        .products
        .update_product(vendor.uuid, product, update)
        .await
        .map_err(into_api_error)?;

    tracing::info!(product_uuid = %product, status = %updated.status, "updated product");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use rentreturn_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductStatus,
    };

    use crate::test_helpers::{make_product, make_user, products_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("vendor/products/{product}").put(handler)
    }

    fn body(status: &str) -> serde_json::Value {
        json!({
            "name": "Trail bike",
            "category": "sports",
            "price_per_day": "30",
            "status": status
        })
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let vendor = make_user(Role::Vendor);
        let vendor_uuid = vendor.uuid;
        let uuid = ProductUuid::new();

        let mut updated = make_product(uuid, &vendor);

        updated.price_per_day = Decimal::from(30);
        updated.status = ProductStatus::Maintenance;

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |owner, u, update| {
                *owner == vendor_uuid
                    && *u == uuid
                    && update.price_per_day == Decimal::from(30)
                    && update.status == Some(ProductStatus::Maintenance)
            })
            .return_once(move |_, _, _| Ok(updated));

        let response: ProductEnvelope =
            TestClient::put(format!("http://example.com/vendor/products/{uuid}"))
                .json(&body("maintenance"))
                .send(&products_service(products, Some(vendor), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(response.product.price_per_day, "30");
        assert_eq!(response.product.status, "maintenance");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_of_other_vendor_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/vendor/products/{uuid}"))
            .json(&body("available"))
            .send(&products_service(
                products,
                Some(make_user(Role::Vendor)),
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_unknown_status_returns_400() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products.expect_update_product().never();

        let res = TestClient::put(format!("http://example.com/vendor/products/{uuid}"))
            .json(&body("retired"))
            .send(&products_service(
                products,
                Some(make_user(Role::Vendor)),
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
