//! Rentals service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as SqlErrorKind},
};
use thiserror::Error;

use crate::{
    domain::rentals::lifecycle::TransitionError, payments::PaymentsError, storage::StorageError,
};

/// Stable classification of a rentals failure, independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidState,
    PreconditionFailed,
    UpstreamFailure,
    Internal,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("payment gateway request failed")]
    Payments(#[from] PaymentsError),

    #[error("evidence upload failed")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum RentalsServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("rental not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("{0}")]
    InvalidState(&'static str),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("{0}")]
    PreconditionFailed(&'static str),

    #[error("upstream service failed")]
    Upstream(#[source] UpstreamError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl RentalsServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound | Self::ProductNotFound => ErrorKind::NotFound,
            Self::InvalidState(_) | Self::Transition(_) => ErrorKind::InvalidState,
            Self::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Self::Upstream(_) => ErrorKind::UpstreamFailure,
            Self::Sql(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<Error> for RentalsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // The only unique index on rentals besides the key is one active rental per product.
            Some(SqlErrorKind::UniqueViolation) => {
                Self::InvalidState("product already has an active rental")
            }
            Some(SqlErrorKind::ForeignKeyViolation) => Self::ProductNotFound,
            Some(SqlErrorKind::CheckViolation) => Self::validation("rental data is out of range"),
            Some(SqlErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PaymentsError> for RentalsServiceError {
    fn from(error: PaymentsError) -> Self {
        Self::Upstream(error.into())
    }
}

impl From<StorageError> for RentalsServiceError {
    fn from(error: StorageError) -> Self {
        Self::Upstream(error.into())
    }
}
