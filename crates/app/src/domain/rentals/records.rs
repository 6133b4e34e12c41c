//! Rental Records

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use rust_decimal::Decimal;

use crate::{
    domain::{UnknownVariant, products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Rental UUID
pub type RentalUuid = TypedUuid<RentalRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RentalStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl RentalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RentalStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant::new("rental status", other)),
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnRequestStatus {
    /// Stored as `none`.
    #[default]
    NotRequested,
    Pending,
    Approved,
    Rejected,
}

impl ReturnRequestStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotRequested => "none",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for ReturnRequestStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::NotRequested),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownVariant::new("return request status", other)),
        }
    }
}

impl fmt::Display for ReturnRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a vendor refused a return.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    Damaged,
    MissingAccessories,
    NotReturned,
    WrongItem,
    Other(String),
}

impl RejectionReason {
    const KNOWN: [Self; 4] = [
        Self::Damaged,
        Self::MissingAccessories,
        Self::NotReturned,
        Self::WrongItem,
    ];

    /// Parse a vendor-supplied reason. Known reasons match case-insensitively by
    /// label (`"Missing accessories"`) or key (`"missing_accessories"`); anything
    /// else is kept verbatim as [`RejectionReason::Other`].
    ///
    /// Returns `None` for a blank reason.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return None;
        }

        let known = Self::KNOWN.into_iter().find(|reason| {
            reason.as_str().eq_ignore_ascii_case(trimmed)
                || reason.key().is_some_and(|key| key.eq_ignore_ascii_case(trimmed))
        });

        Some(known.unwrap_or_else(|| Self::Other(trimmed.to_string())))
    }

    /// Human-readable label, also the stored form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Damaged => "Damaged",
            Self::MissingAccessories => "Missing accessories",
            Self::NotReturned => "Not returned",
            Self::WrongItem => "Wrong item",
            Self::Other(reason) => reason,
        }
    }

    const fn key(&self) -> Option<&'static str> {
        match self {
            Self::Damaged => Some("damaged"),
            Self::MissingAccessories => Some("missing_accessories"),
            Self::NotReturned => Some("not_returned"),
            Self::WrongItem => Some("wrong_item"),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The return-request fields carried on a rental.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReturnRequestState {
    pub status: ReturnRequestStatus,
    pub note: Option<String>,
    pub image_url: Option<String>,
    pub requested_at: Option<Timestamp>,
    pub rejection_reason: Option<RejectionReason>,
    pub rejection_note: Option<String>,
}

/// Rental Record
#[derive(Debug, Clone, PartialEq)]
pub struct RentalRecord {
    pub uuid: RentalUuid,
    pub renter_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub start_date: Date,
    pub end_date: Date,
    pub status: RentalStatus,
    /// Price snapshot taken when the rental was created.
    pub total_amount: Decimal,
    pub payment_intent_id: String,
    pub delivery_address: String,
    pub contact_phone: String,
    pub handed_over_at: Option<Timestamp>,
    pub returned_at: Option<Timestamp>,
    /// Settled fine, written once when the return is approved.
    pub fine_amount: Decimal,
    pub daily_fine: Decimal,
    pub return_request: ReturnRequestState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RentalRecord {
    /// The instant the item is due back: the start of `end_date` in UTC.
    #[must_use]
    pub fn due_at(&self) -> Timestamp {
        self.end_date
            .to_zoned(TimeZone::UTC)
            .map_or(Timestamp::MAX, |zoned| zoned.timestamp())
    }

    #[must_use]
    pub const fn is_returned(&self) -> bool {
        self.returned_at.is_some()
    }
}
