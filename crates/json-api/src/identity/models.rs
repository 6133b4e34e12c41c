//! Identity Models

use garde::Validate;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use rentreturn_app::{domain::identity::records::IdentityStatus, storage::EvidenceImage};

use crate::{errors::ApiError, rentals::requests::EvidenceImageBody};

/// An identity or business document photo.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct DocumentSubmission {
    #[garde(dive)]
    pub document: EvidenceImageBody,
}

impl TryFrom<DocumentSubmission> for EvidenceImage {
    type Error = ApiError;

    fn try_from(submission: DocumentSubmission) -> Result<Self, Self::Error> {
        submission.validate()?;

        submission.document.decode()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DocumentStatusResponse {
    /// One of `unverified`, `pending`, `approved` or `rejected`
    pub status: String,
    pub document_url: Option<String>,
    pub submitted_at: Option<String>,
}

impl From<IdentityStatus> for DocumentStatusResponse {
    fn from(status: IdentityStatus) -> Self {
        Self {
            status: status.status.to_string(),
            submitted_at: status
                .document
                .as_ref()
                .map(|document| document.submitted_at.to_string()),
            document_url: status.document.map(|document| document.document_url),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct KycEnvelope {
    pub success: bool,
    pub kyc: DocumentStatusResponse,
}

impl From<IdentityStatus> for KycEnvelope {
    fn from(status: IdentityStatus) -> Self {
        Self {
            success: true,
            kyc: status.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerificationEnvelope {
    pub success: bool,
    pub verification: DocumentStatusResponse,
}

impl From<IdentityStatus> for VerificationEnvelope {
    fn from(status: IdentityStatus) -> Self {
        Self {
            success: true,
            verification: status.into(),
        }
    }
}
