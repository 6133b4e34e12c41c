//! Identity Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{
        UnknownVariant,
        users::records::{ReviewStatus, Role, UserRecord, UserUuid},
    },
    storage::{KYC_DOCUMENT_FOLDER, VENDOR_DOCUMENT_FOLDER},
};

/// Which review a submitted document feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Renter identity document, reviewed into `kyc_status`.
    Kyc,
    /// Vendor business document, reviewed into `verification_status`.
    Verification,
}

impl DocumentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kyc => "kyc",
            Self::Verification => "verification",
        }
    }

    /// The only role allowed to submit this kind of document.
    #[must_use]
    pub const fn submitter_role(self) -> Role {
        match self {
            Self::Kyc => Role::User,
            Self::Verification => Role::Vendor,
        }
    }

    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Kyc => KYC_DOCUMENT_FOLDER,
            Self::Verification => VENDOR_DOCUMENT_FOLDER,
        }
    }

    /// The user's current review status for this kind.
    #[must_use]
    pub const fn status_of(self, user: &UserRecord) -> ReviewStatus {
        match self {
            Self::Kyc => user.kyc_status,
            Self::Verification => user.verification_status,
        }
    }
}

impl FromStr for DocumentKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "kyc" => Ok(Self::Kyc),
            "verification" => Ok(Self::Verification),
            other => Err(UnknownVariant::new("document kind", other)),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The latest document a user submitted for one review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityDocument {
    pub user_uuid: UserUuid,
    pub kind: DocumentKind,
    pub document_url: String,
    pub submitted_at: Timestamp,
}

/// A review status together with the document behind it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityStatus {
    pub kind: DocumentKind,
    pub status: ReviewStatus,
    pub document: Option<IdentityDocument>,
}

impl IdentityStatus {
    #[must_use]
    pub fn document_url(&self) -> Option<&str> {
        self.document
            .as_ref()
            .map(|document| document.document_url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_route_to_their_own_folder_and_role() {
        assert_eq!(DocumentKind::Kyc.folder(), "rent-return/kyc-documents");
        assert_eq!(DocumentKind::Kyc.submitter_role(), Role::User);
        assert_eq!(
            DocumentKind::Verification.folder(),
            "rent-return/vendor-documents"
        );
        assert_eq!(DocumentKind::Verification.submitter_role(), Role::Vendor);
    }

    #[test]
    fn document_kind_parses_its_own_string_form() {
        for kind in [DocumentKind::Kyc, DocumentKind::Verification] {
            assert_eq!(kind.as_str().parse::<DocumentKind>(), Ok(kind));
        }

        assert_eq!(
            "passport".parse::<DocumentKind>(),
            Err(UnknownVariant::new("document kind", "passport"))
        );
    }
}
