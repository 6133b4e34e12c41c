//! Rentals Data

use std::ops::RangeInclusive;

use jiff::civil::Date;

use crate::{
    domain::{
        products::records::ProductUuid,
        rentals::{
            errors::RentalsServiceError,
            records::{RejectionReason, RentalRecord},
        },
    },
    storage::EvidenceImage,
};

const DELIVERY_ADDRESS_CHARS: RangeInclusive<usize> = 5..=255;
const CONTACT_PHONE_CHARS: RangeInclusive<usize> = 6..=20;
const RETURN_NOTE_MAX_CHARS: usize = 1000;
const REJECTION_NOTE_MAX_CHARS: usize = 1000;

/// Rental length in days, between 1 and 60 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RentalDays(u8);

impl RentalDays {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 60;

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for RentalDays {
    type Error = RentalsServiceError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        u8::try_from(days)
            .ok()
            .filter(|days| (Self::MIN..=Self::MAX).contains(days))
            .map(Self)
            .ok_or_else(|| RentalsServiceError::validation("days must be between 1 and 60"))
    }
}

/// New Rental Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRental {
    pub product_uuid: ProductUuid,
    pub start_date: Date,
    pub days: RentalDays,
    pub delivery_address: String,
    pub contact_phone: String,
}

impl NewRental {
    /// # Errors
    ///
    /// Returns [`RentalsServiceError::Validation`] for out-of-range contact fields.
    pub fn validate(&self) -> Result<(), RentalsServiceError> {
        if !DELIVERY_ADDRESS_CHARS.contains(&self.delivery_address.trim().chars().count()) {
            return Err(RentalsServiceError::validation(
                "delivery address must be between 5 and 255 characters",
            ));
        }

        if !CONTACT_PHONE_CHARS.contains(&self.contact_phone.trim().chars().count()) {
            return Err(RentalsServiceError::validation(
                "contact phone must be between 6 and 20 characters",
            ));
        }

        Ok(())
    }
}

/// A freshly opened rental and the secret the client needs to pay for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRental {
    pub rental: RentalRecord,
    pub client_secret: String,
}

/// Return Request Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRequest {
    /// Renter's description of the item's condition.
    pub note: String,
    pub image: EvidenceImage,
}

impl ReturnRequest {
    /// # Errors
    ///
    /// Returns [`RentalsServiceError::Validation`] for a blank note or a missing
    /// or non-image attachment.
    pub fn validate(&self) -> Result<(), RentalsServiceError> {
        let note = self.note.trim();

        if note.is_empty() {
            return Err(RentalsServiceError::validation("return note is required"));
        }

        if note.chars().count() > RETURN_NOTE_MAX_CHARS {
            return Err(RentalsServiceError::validation(
                "return note must be at most 1000 characters",
            ));
        }

        if self.image.bytes.is_empty() {
            return Err(RentalsServiceError::validation("evidence image is required"));
        }

        if !self.image.content_type.starts_with("image/") {
            return Err(RentalsServiceError::validation(
                "evidence must be an image",
            ));
        }

        Ok(())
    }
}

/// Return Rejection Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRejection {
    pub reason: RejectionReason,
    pub note: Option<String>,
}

impl ReturnRejection {
    /// Build a rejection from raw vendor input.
    ///
    /// # Errors
    ///
    /// Returns [`RentalsServiceError::Validation`] for a blank reason or an
    /// overlong note.
    pub fn parse(reason: &str, note: Option<String>) -> Result<Self, RentalsServiceError> {
        let reason = RejectionReason::parse(reason)
            .ok_or_else(|| RentalsServiceError::validation("rejection reason is required"))?;

        let note = note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());

        if note
            .as_ref()
            .is_some_and(|note| note.chars().count() > REJECTION_NOTE_MAX_CHARS)
        {
            return Err(RentalsServiceError::validation(
                "rejection note must be at most 1000 characters",
            ));
        }

        Ok(Self { reason, note })
    }
}
