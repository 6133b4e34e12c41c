//! Verification Status Handler

use std::sync::Arc;

use salvo::prelude::*;

use rentreturn_app::domain::{identity::records::DocumentKind, users::records::Role};

use crate::{
    errors::ApiError,
    extensions::*,
    identity::{errors::into_api_error, models::VerificationEnvelope},
    state::State,
};

/// Verification Status Handler
#[endpoint(
    tags("identity"),
    summary = "Get Vendor Verification Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Verification status"),
        (status_code = 404, description = "User not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VerificationEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;

    let status = state
        .app
        .identity
        .document_status(vendor, DocumentKind::Verification)
        .await
        .map_err(into_api_error)?;

    Ok(Json(status.into()))
}
