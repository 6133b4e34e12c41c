//! Rental Errors

use tracing::warn;

use rentreturn_app::domain::rentals::{
    RentalsServiceError,
    errors::{ErrorKind, UpstreamError},
};

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: RentalsServiceError) -> ApiError {
    match error.kind() {
        ErrorKind::Validation => ApiError::bad_request(error.to_string()),
        ErrorKind::NotFound => ApiError::not_found(capitalise(&error.to_string())),
        ErrorKind::InvalidState => ApiError::conflict(error.to_string()),
        ErrorKind::PreconditionFailed => ApiError::unprocessable(error.to_string()),
        ErrorKind::UpstreamFailure => upstream(&error),
        ErrorKind::Internal => ApiError::internal("rental query failed", &error),
    }
}

fn upstream(error: &RentalsServiceError) -> ApiError {
    let RentalsServiceError::Upstream(source) = error else {
        return ApiError::bad_gateway("Upstream service failed");
    };

    warn!(error = ?source, "rental upstream call failed");

    match source {
        UpstreamError::Payments(_) => ApiError::bad_gateway("Payment provider request failed"),
        UpstreamError::Storage(_) => ApiError::bad_gateway("Evidence upload failed"),
    }
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();

    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use rentreturn_app::{
        domain::rentals::{lifecycle::TransitionError, records::RentalStatus},
        payments::PaymentsError,
    };

    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        let cases = [
            (
                RentalsServiceError::Validation("days must be between 1 and 60".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (RentalsServiceError::NotFound, StatusCode::NOT_FOUND),
            (RentalsServiceError::ProductNotFound, StatusCode::NOT_FOUND),
            (
                RentalsServiceError::InvalidState("product is not available"),
                StatusCode::CONFLICT,
            ),
            (
                RentalsServiceError::Transition(TransitionError::Rental {
                    from: RentalStatus::Pending,
                    to: RentalStatus::Completed,
                }),
                StatusCode::CONFLICT,
            ),
            (
                RentalsServiceError::PreconditionFailed("kyc approval is required"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                RentalsServiceError::from(PaymentsError::MissingClientSecret("pi_1".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                RentalsServiceError::Sql(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(into_api_error(error).status(), status);
        }
    }

    #[test]
    fn not_found_message_is_capitalised() {
        assert_eq!(
            into_api_error(RentalsServiceError::NotFound).message(),
            "Rental not found"
        );
    }
}
