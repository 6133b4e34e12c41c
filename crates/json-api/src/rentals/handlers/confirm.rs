//! Confirm Rental Handler

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

/// Confirm Rental Handler
///
/// Activates a pending rental after its payment succeeded and marks the
/// product rented.
#[endpoint(
    tags("rentals"),
    summary = "Confirm Rental",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Rental active"),
        (status_code = 404, description = "Rental not found"),
        (status_code = 409, description = "Rental is not pending"),
        (status_code = 422, description = "Payment has not succeeded"),
    ),
)]
pub(crate) async fn handler(
    rental: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RentalEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let renter = depot.user_with_role(Role::User)?;

    let rental = state
        .app
        .rentals
        .confirm_rental(renter, RentalUuid::from_uuid(rental.into_inner()))
        .await
        .map_err(into_api_error)?;

    observe_rental_transition(RentalTransition::Confirmed);

    Ok(Json(RentalEnvelope::at(rental, Timestamp::now())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use rentreturn_app::domain::{
        products::records::ProductUuid,
        rentals::{MockRentalsService, RentalsServiceError},
    };

    use crate::test_helpers::{make_rental, make_user, rentals_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("rentals/{rental}/confirm").post(handler)
    }

    #[tokio::test]
    async fn test_confirm_rental_returns_active_rental() -> TestResult {
        let renter = make_user(Role::User);
        let uuid = RentalUuid::new();
        let rental = make_rental(uuid, &renter, ProductUuid::new());

        let mut rentals = MockRentalsService::new();

        rentals
            .expect_confirm_rental()
            .once()
            .withf(move |_, u| *u == uuid)
            .return_once(move |_, _| Ok(rental));

        let response: RentalEnvelope =
            TestClient::post(format!("http://example.com/rentals/{uuid}/confirm"))
                .send(&rentals_service(rentals, renter, route()))
                .await
                .take_json()
                .await?;

        assert_eq!(response.rental.uuid, uuid.into_uuid());
        assert_eq!(response.rental.status, "active");

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_unsettled_payment_returns_422() -> TestResult {
        let uuid = RentalUuid::new();

        let mut rentals = MockRentalsService::new();

        rentals.expect_confirm_rental().once().return_once(|_, _| {
            Err(RentalsServiceError::PreconditionFailed(
                "payment has not succeeded",
            ))
        });

        let res = TestClient::post(format!("http://example.com/rentals/{uuid}/confirm"))
            .send(&rentals_service(rentals, make_user(Role::User), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_foreign_rental_returns_404() -> TestResult {
        let uuid = RentalUuid::new();

        let mut rentals = MockRentalsService::new();

        rentals
            .expect_confirm_rental()
            .once()
            .return_once(|_, _| Err(RentalsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/rentals/{uuid}/confirm"))
            .send(&rentals_service(rentals, make_user(Role::User), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
