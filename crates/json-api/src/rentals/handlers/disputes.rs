//! Disputes Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use rentreturn_app::domain::users::records::Role;

use crate::{
    errors::ApiError,
    extensions::*,
    rentals::{errors::into_api_error, models::DisputesEnvelope},
    state::State,
};

/// Disputes Handler
///
/// Returns every rental whose return request is under review or decided,
/// with both parties attached.
#[endpoint(
    tags("admin"),
    summary = "List Return Disputes",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<DisputesEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_with_role(Role::Superadmin)?;

    let point_in_time = at.into_point_in_time()?;

    let disputes = state
        .app
        .rentals
        .list_disputes()
        .await
        .map_err(into_api_error)?;

    Ok(Json(DisputesEnvelope::at(disputes, point_in_time)))
}
