//! Identity Errors

use tracing::warn;

use rentreturn_app::domain::identity::{IdentityServiceError, records::DocumentKind};

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: IdentityServiceError) -> ApiError {
    match error {
        IdentityServiceError::NotFound => ApiError::not_found("User not found"),
        IdentityServiceError::WrongRole(_) => ApiError::forbidden("Insufficient permissions"),
        IdentityServiceError::AlreadyApproved(DocumentKind::Kyc) => {
            ApiError::conflict("KYC is already approved")
        }
        IdentityServiceError::AlreadyApproved(DocumentKind::Verification) => {
            ApiError::conflict("Vendor is already verified")
        }
        IdentityServiceError::Upload(source) => {
            warn!(error = ?source, "identity document upload failed");

            ApiError::bad_gateway("Document upload failed")
        }
        IdentityServiceError::Sql(source) => ApiError::internal("identity query failed", &source),
    }
}
