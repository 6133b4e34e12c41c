//! Product Errors

use rentreturn_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::AlreadyExists => ApiError::conflict("Product already exists"),
        ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
        ProductsServiceError::Validation(message) => ApiError::bad_request(message),
        ProductsServiceError::InvalidReference | ProductsServiceError::InvalidData => {
            ApiError::bad_request("Invalid product payload")
        }
        ProductsServiceError::VendorNotVerified => {
            ApiError::unprocessable("Vendor verification is required before listing products")
        }
        ProductsServiceError::Rented => ApiError::conflict("Product is currently rented"),
        ProductsServiceError::Sql(source) => ApiError::internal("product query failed", &source),
    }
}
