//! Platform Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use rentreturn_app::domain::users::records::Role;

use crate::{
    admin::models::StatsEnvelope,
    errors::ApiError,
    extensions::*,
    rentals::errors::into_api_error,
    state::State,
};

/// Platform Stats Handler
#[endpoint(
    tags("admin"),
    summary = "Platform Statistics",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_with_role(Role::Superadmin)?;

    let stats = state
        .app
        .rentals
        .platform_stats()
        .await
        .map_err(into_api_error)?;

    Ok(Json(StatsEnvelope {
        success: true,
        stats: stats.into(),
    }))
}
