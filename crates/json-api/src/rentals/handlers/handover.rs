//! Handover Handler

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

/// Handover Handler
///
/// Records that the vendor delivered the item. Only the first call sets the
/// handover time.
#[endpoint(
    tags("vendor"),
    summary = "Mark Handed Over",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Handover recorded"),
        (status_code = 404, description = "Rental not found"),
        (status_code = 409, description = "Rental is not active or already handed over"),
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
        .mark_handed_over(vendor, RentalUuid::from_uuid(rental.into_inner()), now)
        .await
        .map_err(into_api_error)?;

    observe_rental_transition(RentalTransition::HandedOver);

    Ok(Json(RentalEnvelope::at(rental, now)))
}
