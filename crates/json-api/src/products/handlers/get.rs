//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use rentreturn_app::domain::products::records::ProductUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, models::ProductEnvelope},
    state::State,
};

/// Get Product Handler
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(ProductUuid::from_uuid(product.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(product.into()))
}
