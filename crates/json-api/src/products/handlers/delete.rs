//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use rentreturn_app::domain::{products::records::ProductUuid, users::records::Role};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, models::ProductDeletedResponse},
    state::State,
};

/// Delete Product Handler
///
/// Removes one of the caller's products with its rental history. A product
/// that is currently rented cannot be deleted.
#[endpoint(
    tags("vendor"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product is rented"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductDeletedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;
    let product = ProductUuid::from_uuid(product.into_inner());

    state
        .app
        .products
        .delete_product(vendor.uuid, product)
        .await
        .map_err(into_api_error)?;

    tracing::info!(product_uuid = %product, "deleted product");

    Ok(Json(ProductDeletedResponse {
        success: true,
        message: "Product deleted".to_string(),
    }))
}
