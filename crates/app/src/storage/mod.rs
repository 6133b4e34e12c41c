//! Evidence image storage

use async_trait::async_trait;
use mockall::automock;

mod cloudinary;
mod errors;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig, DEFAULT_CLOUDINARY_API_BASE};
pub use errors::StorageError;

/// Folder holding the photos renters attach to return requests.
pub const RETURN_EVIDENCE_FOLDER: &str = "rent-return/return-evidence";

/// Folder holding renter identity documents.
pub const KYC_DOCUMENT_FOLDER: &str = "rent-return/kyc-documents";

/// Folder holding vendor business documents.
pub const VENDOR_DOCUMENT_FOLDER: &str = "rent-return/vendor-documents";

/// Raw image bytes as received from the client.
#[derive(Clone, PartialEq, Eq)]
pub struct EvidenceImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl std::fmt::Debug for EvidenceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceImage")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// A hosted copy of an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
}

#[automock]
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Upload `image` into `folder` and return its public URL.
    async fn upload(&self, image: EvidenceImage, folder: &str)
    -> Result<StoredImage, StorageError>;
}
