//! Admin Handlers

pub(crate) mod kyc;
pub(crate) mod pending_vendors;
pub(crate) mod stats;
pub(crate) mod verification;

use rentreturn_app::domain::{UnknownVariant, users::records::ReviewStatus};

use crate::{admin::models::ReviewRequest, errors::ApiError};

fn review_status(request: &ReviewRequest) -> Result<ReviewStatus, ApiError> {
    request
        .status
        .trim()
        .parse()
        .map_err(|error: UnknownVariant| ApiError::bad_request(error.to_string()))
}
