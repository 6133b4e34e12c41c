//! Renter Rentals Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use rentreturn_app::domain::users::records::Role;

use crate::{
    errors::ApiError,
    extensions::*,
    rentals::{errors::into_api_error, models::RenterRentalsEnvelope},
    state::State,
};

/// Renter Rentals Handler
///
/// Returns the caller's rentals, newest first, with fines projected at `at`.
#[endpoint(
    tags("rentals"),
    summary = "List My Rentals",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<RenterRentalsEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let renter = depot.user_with_role(Role::User)?;
    let point_in_time = at.into_point_in_time()?;

    let rentals = state
        .app
        .rentals
        .list_renter_rentals(renter)
        .await
        .map_err(into_api_error)?;

    Ok(Json(RenterRentalsEnvelope::at(rentals, point_in_time)))
}
