//! Pending Vendors Handler

use std::sync::Arc;

use salvo::prelude::*;

use rentreturn_app::domain::users::records::Role;

use crate::{
    admin::{errors::into_api_error, models::UsersEnvelope},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Pending Vendors Handler
///
/// Returns vendors waiting for verification, oldest first.
#[endpoint(
    tags("admin"),
    summary = "List Pending Vendors",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_with_role(Role::Superadmin)?;

    let vendors = state
        .app
        .users
        .list_pending_vendors()
        .await
        .map_err(into_api_error)?;

    Ok(Json(UsersEnvelope {
        success: true,
        users: vendors.into_iter().map(Into::into).collect(),
    }))
}
