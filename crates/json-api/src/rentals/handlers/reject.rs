//! Reject Return Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use rentreturn_app::domain::{
    rentals::{data::ReturnRejection, records::RentalUuid},
    users::records::Role,
};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{RentalTransition, observe_rental_transition},
    rentals::{errors::into_api_error, models::RentalEnvelope, requests::RejectReturnRequest},
    state::State,
};

/// Reject Return Handler
///
/// Refuses the pending return request with a reason. The rental stays active
/// and the renter may submit a new request.
#[endpoint(
    tags("vendor"),
    summary = "Reject Return",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Return rejected"),
        (status_code = 404, description = "Rental not found"),
        (status_code = 409, description = "No return request is pending"),
    ),
)]
pub(crate) async fn handler(
    rental: PathParam<Uuid>,
    json: JsonBody<RejectReturnRequest>,
    depot: &mut Depot,
) -> Result<Json<RentalEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;
    let rejection = ReturnRejection::try_from(json.into_inner())?;

    let rental = state
        .app
        .rentals
        .reject_return(vendor, RentalUuid::from_uuid(rental.into_inner()), rejection)
        .await
        .map_err(into_api_error)?;

    observe_rental_transition(RentalTransition::ReturnRejected);

    Ok(Json(RentalEnvelope::at(rental, Timestamp::now())))
}
