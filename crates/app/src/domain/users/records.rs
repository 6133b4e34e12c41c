//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::UnknownVariant, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Account role. Role gates compare for an exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Vendor,
    Admin,
    Superadmin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Vendor => "vendor",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            other => Err(UnknownVariant::new("role", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state shared by renter KYC and vendor verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReviewStatus {
    #[default]
    Unverified,
    Pending,
    Approved,
    Rejected,
}

/// Renter identity check, gates rental creation.
pub type KycStatus = ReviewStatus;

/// Vendor document check, gates product listing.
pub type VerificationStatus = ReviewStatus;

impl ReviewStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl FromStr for ReviewStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "unverified" => Ok(Self::Unverified),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownVariant::new("review status", other)),
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub kyc_status: KycStatus,
    pub verification_status: VerificationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    /// Whether this account may open new rentals.
    #[must_use]
    pub const fn can_rent(&self) -> bool {
        self.kyc_status.is_approved()
    }

    /// Whether this account may publish products.
    #[must_use]
    pub fn can_list_products(&self) -> bool {
        self.role == Role::Vendor && self.verification_status.is_approved()
    }

    #[must_use]
    pub fn summary(&self) -> PartySummary {
        PartySummary {
            uuid: self.uuid,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The identity of a customer or vendor as shown alongside a rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartySummary {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_its_own_string_form() {
        for role in [Role::User, Role::Vendor, Role::Admin, Role::Superadmin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn unknown_review_status_is_rejected() {
        let result = "maybe".parse::<ReviewStatus>();

        assert_eq!(result, Err(UnknownVariant::new("review status", "maybe")));
    }

    #[test]
    fn unverified_vendor_cannot_list_products() {
        let now = Timestamp::now();

        let mut vendor = UserRecord {
            uuid: UserUuid::new(),
            name: "Vendor".to_string(),
            email: "vendor@example.com".to_string(),
            role: Role::Vendor,
            kyc_status: KycStatus::Unverified,
            verification_status: VerificationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        assert!(!vendor.can_list_products());

        vendor.verification_status = VerificationStatus::Approved;

        assert!(vendor.can_list_products());
        assert!(!vendor.can_rent());
    }
}
