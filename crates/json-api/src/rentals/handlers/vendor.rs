//! Vendor Rentals Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use rentreturn_app::domain::users::records::Role;

use crate::{
    errors::ApiError,
    extensions::*,
    rentals::{errors::into_api_error, models::VendorDashboardEnvelope},
    state::State,
};

/// Vendor Rentals Handler
///
/// Returns rentals of the caller's products with customer details and
/// dashboard totals, all measured at `at`.
#[endpoint(
    tags("vendor"),
    summary = "Vendor Rental Dashboard",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<VendorDashboardEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;
    let point_in_time = at.into_point_in_time()?;

    let dashboard = state
        .app
        .rentals
        .vendor_dashboard(vendor, point_in_time)
        .await
        .map_err(into_api_error)?;

    Ok(Json(VendorDashboardEnvelope::at(dashboard, point_in_time)))
}
