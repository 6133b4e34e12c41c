//! Create Rental Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use rentreturn_app::domain::{rentals::data::NewRental, users::records::Role};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{RentalTransition, observe_rental_transition},
    rentals::{
        errors::into_api_error, models::CreatedRentalEnvelope, requests::CreateRentalRequest,
    },
    state::State,
};

/// Create Rental Handler
///
/// Opens a pending rental and a payment intent for its total. The returned
/// client secret completes the payment on the client.
#[endpoint(
    tags("rentals"),
    summary = "Create Rental",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 201, description = "Rental created"),
        (status_code = 404, description = "Product not found"),
        (status_code = 409, description = "Product is not available"),
        (status_code = 422, description = "KYC approval is required"),
        (status_code = 502, description = "Payment provider request failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateRentalRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CreatedRentalEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let renter = depot.user_with_role(Role::User)?;
    let rental = NewRental::try_from(json.into_inner())?;

    let created = state
        .app
        .rentals
        .create_rental(renter, rental)
        .await
        .map_err(into_api_error)?;

    observe_rental_transition(RentalTransition::Created);

    res.add_header(LOCATION, format!("/rentals/{}", created.rental.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CreatedRentalEnvelope::at(created, Timestamp::now())))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use rentreturn_app::domain::{
        products::records::ProductUuid,
        rentals::{
            MockRentalsService, RentalsServiceError,
            data::CreatedRental,
            records::{RentalStatus, RentalUuid},
        },
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{make_rental, make_user, rentals_service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("rentals").post(handler)
    }

    fn body(product: ProductUuid, days: i64) -> serde_json::Value {
        json!({
            "product_uuid": product.into_uuid(),
            "start_date": "2024-06-01",
            "days": days,
            "delivery_address": "12 Harbour Road",
            "contact_phone": "+15550100"
        })
    }

    #[tokio::test]
    async fn test_create_rental_returns_client_secret() -> TestResult {
        let renter = make_user(Role::User);
        let renter_uuid = renter.uuid;
        let product = ProductUuid::new();
        let uuid = RentalUuid::new();

        let mut rental = make_rental(uuid, &renter, product);

        rental.status = RentalStatus::Pending;

        let mut rentals = MockRentalsService::new();

        rentals
            .expect_create_rental()
            .once()
            .withf(move |caller, new| {
                caller.uuid == renter_uuid
                    && new.product_uuid == product
                    && new.days.get() == 3
                    && new.start_date.to_string() == "2024-06-01"
            })
            .return_once(move |_, _| {
                Ok(CreatedRental {
                    rental,
                    client_secret: "pi_1_secret".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/rentals")
            .json(&body(product, 3))
            .send(&rentals_service(rentals, renter, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let response: CreatedRentalEnvelope = res.take_json().await?;

        assert!(response.success);
        assert_eq!(response.client_secret, "pi_1_secret");
        assert_eq!(response.rental.status, "pending");
        assert_eq!(response.rental.total_amount, Decimal::from(80).to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rental_without_kyc_returns_422() -> TestResult {
        let mut rentals = MockRentalsService::new();

        rentals.expect_create_rental().once().return_once(|_, _| {
            Err(RentalsServiceError::PreconditionFailed(
                "kyc approval is required to rent",
            ))
        });

        let mut res = TestClient::post("http://example.com/rentals")
            .json(&body(ProductUuid::new(), 3))
            .send(&rentals_service(rentals, make_user(Role::User), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        let body: ErrorResponse = res.take_json().await?;

        assert!(!body.success);
        assert_eq!(body.message, "kyc approval is required to rent");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rental_out_of_range_days_returns_400() -> TestResult {
        let mut rentals = MockRentalsService::new();

        rentals.expect_create_rental().never();

        let res = TestClient::post("http://example.com/rentals")
            .json(&body(ProductUuid::new(), 0))
            .send(&rentals_service(rentals, make_user(Role::User), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rental_with_non_iso_date_returns_json_400() -> TestResult {
        let mut rentals = MockRentalsService::new();

        rentals.expect_create_rental().never();

        let mut request = body(ProductUuid::new(), 3);

        request["start_date"] = json!("06/01/2024");

        let mut res = TestClient::post("http://example.com/rentals")
            .json(&request)
            .send(&rentals_service(rentals, make_user(Role::User), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert!(!body.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rental_by_vendor_returns_403() -> TestResult {
        let mut rentals = MockRentalsService::new();

        rentals.expect_create_rental().never();

        let res = TestClient::post("http://example.com/rentals")
            .json(&body(ProductUuid::new(), 3))
            .send(&rentals_service(rentals, make_user(Role::Vendor), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rental_gateway_failure_returns_502() -> TestResult {
        let mut rentals = MockRentalsService::new();

        rentals.expect_create_rental().once().return_once(|_, _| {
            Err(RentalsServiceError::from(
                rentreturn_app::payments::PaymentsError::MissingClientSecret("pi_9".to_string()),
            ))
        });

        let res = TestClient::post("http://example.com/rentals")
            .json(&body(ProductUuid::new(), 3))
            .send(&rentals_service(rentals, make_user(Role::User), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
