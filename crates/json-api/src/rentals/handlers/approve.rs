//! Approve Return Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use rentreturn_app::domain::{rentals::records::RentalUuid, users::records::Role};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{RentalTransition, observe_rental_transition},
    rentals::{errors::into_api_error, models::RentalEnvelope},
    state::State,
};

/// Approve Return Handler
///
/// Accepts the pending return request, settles any overdue fine, completes
/// the rental and makes the product available again.
#[endpoint(
    tags("vendor"),
    summary = "Approve Return",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Rental completed"),
        (status_code = 404, description = "Rental not found"),
        (status_code = 409, description = "No return request is pending"),
    ),
)]
pub(crate) async fn handler(
    rental: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RentalEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;
    let now = Timestamp::now();

    let rental = state
        .app
        .rentals
        .approve_return(vendor, RentalUuid::from_uuid(rental.into_inner()), now)
        .await
        .map_err(into_api_error)?;

    observe_rental_transition(RentalTransition::Completed);

    Ok(Json(RentalEnvelope::at(rental, now)))
}
