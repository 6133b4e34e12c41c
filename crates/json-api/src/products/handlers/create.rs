//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use rentreturn_app::domain::users::records::Role;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, models::ProductEnvelope, requests::ProductRequest},
    state::State,
};

/// Create Product Handler
///
/// Lists a product for the calling vendor, who must be verified.
#[endpoint(
    tags("vendor"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 201, description = "Product created"),
        (status_code = 409, description = "Product already exists"),
        (status_code = 422, description = "Vendor is not verified"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;
    let product = json.into_inner().into_new_product()?;

    let product = state
        .app
        .products
        .create_product(vendor, product)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %product.uuid, vendor_uuid = %vendor.uuid, "created product");

    Ok(Json(product.into()))
}
