//! Depot helper extensions.

use std::any::{Any, type_name};

use salvo::{http::StatusCode, prelude::Depot};
use tracing::error;

use rentreturn_app::domain::users::records::{Role, UserRecord};

use crate::errors::ApiError;

pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_current_user(&mut self, user: UserRecord);

    /// The authenticated caller, or 401 when the auth hoop did not run.
    fn current_user_or_401(&self) -> Result<&UserRecord, ApiError>;

    /// The authenticated caller, or 403 unless their role is exactly `role`.
    fn user_with_role(&self, role: Role) -> Result<&UserRecord, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| {
            error!("depot is missing {}", type_name::<T>());

            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        })
    }

    fn insert_current_user(&mut self, user: UserRecord) {
        self.inject(user);
    }

    fn current_user_or_401(&self) -> Result<&UserRecord, ApiError> {
        self.obtain::<UserRecord>()
            .map_err(|_ignored| ApiError::unauthorized("Authentication required"))
    }

    fn user_with_role(&self, role: Role) -> Result<&UserRecord, ApiError> {
        let user = self.current_user_or_401()?;

        if user.role != role {
            return Err(ApiError::forbidden(format!(
                "This action requires the {role} role"
            )));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::make_user;

    use super::*;

    #[test]
    fn missing_user_is_unauthorized() {
        let depot = Depot::new();

        let status = depot.current_user_or_401().err().map(|error| error.status());

        assert_eq!(status, Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn role_gate_is_an_exact_match() {
        let mut depot = Depot::new();

        depot.insert_current_user(make_user(Role::Superadmin));

        assert!(depot.user_with_role(Role::Superadmin).is_ok());

        let status = depot
            .user_with_role(Role::Vendor)
            .err()
            .map(|error| error.status());

        assert_eq!(status, Some(StatusCode::FORBIDDEN));
    }
}
