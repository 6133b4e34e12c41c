//! KYC Review Handler

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

/// KYC Review Handler
///
/// Records the outcome of a renter's identity check. Only approved renters
/// may open rentals.
#[endpoint(
    tags("admin"),
    summary = "Set KYC Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "KYC status updated"),
        (status_code = 404, description = "User not found"),
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

    let user = state
        .app
        .users
        .set_kyc_status(UserUuid::from_uuid(user.into_inner()), status)
        .await
        .map_err(into_api_error)?;

    tracing::info!(user = %user.uuid, reviewer = %reviewer.uuid, %status, "kyc reviewed");

    Ok(Json(user.into()))
}
