//! Return Request Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use rentreturn_app::domain::{
    rentals::{data::ReturnRequest, records::RentalUuid},
    users::records::Role,
};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{RentalTransition, observe_rental_transition},
    rentals::{errors::into_api_error, models::RentalEnvelope, requests::ReturnRequestBody},
    state::State,
};

/// Return Request Handler
///
/// Submits a return request with a note and a photo of the returned item.
/// A rejected request may be submitted again.
#[endpoint(
    tags("rentals"),
    summary = "Request Return",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Return requested"),
        (status_code = 404, description = "Rental not found"),
        (status_code = 409, description = "Rental is not active or a request is pending"),
        (status_code = 502, description = "Evidence upload failed"),
    ),
)]
pub(crate) async fn handler(
    rental: PathParam<Uuid>,
    json: JsonBody<ReturnRequestBody>,
    depot: &mut Depot,
) -> Result<Json<RentalEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let renter = depot.user_with_role(Role::User)?;
    let request = ReturnRequest::try_from(json.into_inner())?;
    let now = Timestamp::now();

    let rental = state
        .app
        .rentals
        .request_return(
            renter,
            RentalUuid::from_uuid(rental.into_inner()),
            request,
            now,
        )
        .await
        .map_err(into_api_error)?;

    observe_rental_transition(RentalTransition::ReturnRequested);

    Ok(Json(RentalEnvelope::at(rental, now)))
}
