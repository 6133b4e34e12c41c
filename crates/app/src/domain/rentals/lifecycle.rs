//! Rental Lifecycle Transitions
//!
//! Rental status moves `pending -> active -> completed`. `cancelled` is reachable
//! from `pending` or `active` but no service operation takes it; it exists for
//! manual data correction.
//!
//! Return requests move `none -> pending -> approved | rejected`, and a rejected
//! request may be resubmitted (`rejected -> pending`).

use thiserror::Error;

use crate::domain::rentals::records::{RentalStatus, ReturnRequestStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("rental cannot move from {from} to {to}")]
    Rental {
        from: RentalStatus,
        to: RentalStatus,
    },

    #[error("return request cannot move from {from} to {to}")]
    ReturnRequest {
        from: ReturnRequestStatus,
        to: ReturnRequestStatus,
    },
}

impl RentalStatus {
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active | Self::Cancelled)
                | (Self::Active, Self::Completed | Self::Cancelled)
        )
    }

    /// # Errors
    ///
    /// Returns [`TransitionError::Rental`] when `next` is not a legal successor.
    pub const fn transition_to(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError::Rental {
                from: self,
                to: next,
            })
        }
    }
}

impl ReturnRequestStatus {
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotRequested | Self::Rejected, Self::Pending)
                | (Self::Pending, Self::Approved | Self::Rejected)
        )
    }

    /// # Errors
    ///
    /// Returns [`TransitionError::ReturnRequest`] when `next` is not a legal
    /// successor.
    pub const fn transition_to(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError::ReturnRequest {
                from: self,
                to: next,
            })
        }
    }
}
