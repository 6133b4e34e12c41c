//! KYC Status Handler

use std::sync::Arc;

use salvo::prelude::*;

use rentreturn_app::domain::{identity::records::DocumentKind, users::records::Role};

use crate::{
    errors::ApiError,
    extensions::*,
    identity::{errors::into_api_error, models::KycEnvelope},
    state::State,
};

/// KYC Status Handler
///
/// The caller's KYC review status and latest submitted document.
#[endpoint(
    tags("identity"),
    summary = "Get KYC Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "KYC status"),
        (status_code = 404, description = "User not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<KycEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let renter = depot.user_with_role(Role::User)?;

    let status = state
        .app
        .identity
        .document_status(renter, DocumentKind::Kyc)
        .await
        .map_err(into_api_error)?;

    Ok(Json(status.into()))
}
