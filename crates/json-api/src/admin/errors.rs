//! Admin Errors

use rentreturn_app::domain::users::UsersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::AlreadyExists => ApiError::conflict("User already exists"),
        UsersServiceError::NotFound => ApiError::not_found("User not found"),
        UsersServiceError::NotVendor => ApiError::unprocessable("User is not a vendor"),
        UsersServiceError::InvalidData => ApiError::bad_request("Invalid user data"),
        UsersServiceError::Sql(source) => ApiError::internal("user query failed", &source),
    }
}
