//! Product Index Handler

use std::{str::FromStr, sync::Arc};

use salvo::{oapi::extract::QueryParam, prelude::*};

use rentreturn_app::domain::{UnknownVariant, products::data::ProductFilter};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, models::ProductsEnvelope},
    state::State,
};

fn parse_filter<T: FromStr<Err = UnknownVariant>>(
    value: Option<String>,
) -> Result<Option<T>, ApiError> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<T>())
        .transpose()
        .map_err(|error| ApiError::bad_request(error.to_string()))
}

/// Product Index Handler
///
/// Returns the public catalog, newest first, optionally narrowed by category
/// and status.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: parse_filter(category.into_inner())?,
        status: parse_filter(status.into_inner())?,
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_api_error)?;

    Ok(Json(products.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use rentreturn_app::domain::{
        products::{
            MockProductsService, ProductsServiceError,
            records::{ProductCategory, ProductStatus, ProductUuid},
        },
        users::records::Role,
    };

    use crate::test_helpers::{make_product, make_user, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, None, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products_without_auth() -> TestResult {
        let vendor = make_user(Role::Vendor);
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();
        let listed = vec![make_product(uuid_a, &vendor), make_product(uuid_b, &vendor)];

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| *filter == ProductFilter::default())
            .return_once(move |_| Ok(listed));

        let response: ProductsEnvelope = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(response.success);
        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products[0].uuid, uuid_a.into_uuid());
        assert_eq!(response.products[1].price_per_day, "25");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| {
                filter.category == Some(ProductCategory::Fashion)
                    && filter.status == Some(ProductStatus::Available)
            })
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?category=fashion&status=available")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_category_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?category=toys")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
