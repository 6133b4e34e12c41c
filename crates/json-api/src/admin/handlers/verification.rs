//! Vendor Verification Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use rentreturn_app::domain::users::records::{Role, UserUuid};

use crate::{
    admin::{
        errors::into_api_error,
        models::{ReviewRequest, UserEnvelope},
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

use super::review_status;

/// Vendor Verification Handler
///
/// Records the outcome of a vendor's verification. Only verified vendors may
/// list products.
#[endpoint(
    tags("admin"),
    summary = "Set Vendor Verification",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Verification updated"),
        (status_code = 404, description = "User not found"),
        (status_code = 422, description = "User is not a vendor"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<ReviewRequest>,
    depot: &mut Depot,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let reviewer = depot.user_with_role(Role::Superadmin)?;
    let status = review_status(&json.into_inner())?;

    let vendor = state
        .app
        .users
        .set_verification_status(UserUuid::from_uuid(user.into_inner()), status)
        .await
        .map_err(into_api_error)?;

    tracing::info!(
        vendor = %vendor.uuid,
        reviewer = %reviewer.uuid,
        %status,
        "vendor verification reviewed"
    );

    Ok(Json(vendor.into()))
}
