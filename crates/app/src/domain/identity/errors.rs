//! Identity service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{domain::identity::records::DocumentKind, storage::StorageError};

#[derive(Debug, Error)]
pub enum IdentityServiceError {
    #[error("user not found")]
    NotFound,

    #[error("{} documents cannot be submitted by this account", .0.as_str())]
    WrongRole(DocumentKind),

    #[error("{} review is already approved", .0.as_str())]
    AlreadyApproved(DocumentKind),

    #[error("document upload failed")]
    Upload(#[from] StorageError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for IdentityServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
