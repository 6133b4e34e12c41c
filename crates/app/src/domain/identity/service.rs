//! Identity service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        identity::{
            errors::IdentityServiceError,
            records::{DocumentKind, IdentityStatus},
            repository::PgIdentityRepository,
        },
        users::{
            records::{ReviewStatus, UserRecord},
            repository::PgUsersRepository,
        },
    },
    storage::{EvidenceImage, EvidenceStore},
};

#[derive(Clone)]
pub struct PgIdentityService {
    db: Db,
    documents: PgIdentityRepository,
    users: PgUsersRepository,
    store: Arc<dyn EvidenceStore>,
}

impl PgIdentityService {
    #[must_use]
    pub fn new(db: Db, store: Arc<dyn EvidenceStore>) -> Self {
        Self {
            db,
            documents: PgIdentityRepository::new(),
            users: PgUsersRepository::new(),
            store,
        }
    }
}

impl fmt::Debug for PgIdentityService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgIdentityService").finish_non_exhaustive()
    }
}

fn ensure_submitter(user: &UserRecord, kind: DocumentKind) -> Result<(), IdentityServiceError> {
    if user.role == kind.submitter_role() {
        Ok(())
    } else {
        Err(IdentityServiceError::WrongRole(kind))
    }
}

#[async_trait]
impl IdentityService for PgIdentityService {
    async fn submit_document(
        &self,
        user: &UserRecord,
        kind: DocumentKind,
        image: EvidenceImage,
        now: Timestamp,
    ) -> Result<IdentityStatus, IdentityServiceError> {
        ensure_submitter(user, kind)?;

        let mut tx = self.db.begin().await?;

        let current = self.users.get_user(&mut tx, user.uuid).await?;

        tx.commit().await?;

        if kind.status_of(&current).is_approved() {
            return Err(IdentityServiceError::AlreadyApproved(kind));
        }

        // A failed upload must leave the review untouched.
        let stored = self.store.upload(image, kind.folder()).await?;

        let mut tx = self.db.begin().await?;

        let document = self
            .documents
            .upsert_document(&mut tx, user.uuid, kind, &stored.url, now)
            .await?;

        let updated = match kind {
            DocumentKind::Kyc => {
                self.users
                    .set_kyc_status(&mut tx, user.uuid, ReviewStatus::Pending)
                    .await?
            }
            DocumentKind::Verification => self
                .users
                .set_verification_status(&mut tx, user.uuid, ReviewStatus::Pending)
                .await?
                .ok_or(IdentityServiceError::WrongRole(kind))?,
        };

        tx.commit().await?;

        tracing::info!(
            user = %user.uuid,
            kind = %kind,
            "identity document submitted"
        );

        Ok(IdentityStatus {
            kind,
            status: kind.status_of(&updated),
            document: Some(document),
        })
    }

    async fn document_status(
        &self,
        user: &UserRecord,
        kind: DocumentKind,
    ) -> Result<IdentityStatus, IdentityServiceError> {
        ensure_submitter(user, kind)?;

        let mut tx = self.db.begin().await?;

        let current = self.users.get_user(&mut tx, user.uuid).await?;
        let document = self.documents.get_document(&mut tx, user.uuid, kind).await?;

        tx.commit().await?;

        Ok(IdentityStatus {
            kind,
            status: kind.status_of(&current),
            document,
        })
    }
}

#[automock]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Upload `image` as the user's `kind` document and queue it for review.
    ///
    /// Renters submit [`DocumentKind::Kyc`], vendors submit
    /// [`DocumentKind::Verification`]. A rejected or unverified review goes
    /// back to `pending`; an approved one cannot be resubmitted.
    async fn submit_document(
        &self,
        user: &UserRecord,
        kind: DocumentKind,
        image: EvidenceImage,
        now: Timestamp,
    ) -> Result<IdentityStatus, IdentityServiceError>;

    /// The user's current `kind` review status and latest document.
    async fn document_status(
        &self,
        user: &UserRecord,
        kind: DocumentKind,
    ) -> Result<IdentityStatus, IdentityServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::{
            UsersService,
            records::{KycStatus, Role, VerificationStatus},
        },
        storage::{KYC_DOCUMENT_FOLDER, VENDOR_DOCUMENT_FOLDER},
        test::{
            TestContext,
            helpers::{create_approved_renter, create_verified_vendor, evidence_image, new_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn kyc_submission_queues_renter_for_review() -> TestResult {
        let ctx = TestContext::new().await;
        let renter = ctx.users.create_user(new_user(Role::User)).await?;
        let submitted_at: Timestamp = "2024-06-01T09:30:00Z".parse()?;

        let status = ctx
            .identity
            .submit_document(&renter, DocumentKind::Kyc, evidence_image(), submitted_at)
            .await?;

        assert_eq!(status.status, KycStatus::Pending);
        assert_eq!(
            status.document.as_ref().map(|document| document.submitted_at),
            Some(submitted_at)
        );
        assert!(status.document_url().is_some());
        assert_eq!(
            ctx.evidence.uploaded_folders(),
            vec![KYC_DOCUMENT_FOLDER.to_string()]
        );

        let reloaded = ctx.users.get_user(renter.uuid).await?;

        assert_eq!(reloaded.kyc_status, KycStatus::Pending);
        assert!(!reloaded.can_rent());

        Ok(())
    }

    #[tokio::test]
    async fn kyc_status_reports_latest_document() -> TestResult {
        let ctx = TestContext::new().await;
        let renter = ctx.users.create_user(new_user(Role::User)).await?;

        let before = ctx
            .identity
            .document_status(&renter, DocumentKind::Kyc)
            .await?;

        assert_eq!(before.status, KycStatus::Unverified);
        assert_eq!(before.document, None);

        let first = ctx
            .identity
            .submit_document(&renter, DocumentKind::Kyc, evidence_image(), Timestamp::now())
            .await?;

        ctx.users
            .set_kyc_status(renter.uuid, KycStatus::Rejected)
            .await?;

        let second = ctx
            .identity
            .submit_document(&renter, DocumentKind::Kyc, evidence_image(), Timestamp::now())
            .await?;

        assert_ne!(first.document_url(), second.document_url());

        let after = ctx
            .identity
            .document_status(&renter, DocumentKind::Kyc)
            .await?;

        assert_eq!(after.status, KycStatus::Pending);
        assert_eq!(after.document_url(), second.document_url());

        Ok(())
    }

    #[tokio::test]
    async fn approved_kyc_cannot_be_resubmitted() -> TestResult {
        let ctx = TestContext::new().await;
        let renter = create_approved_renter(&ctx).await?;

        let result = ctx
            .identity
            .submit_document(&renter, DocumentKind::Kyc, evidence_image(), Timestamp::now())
            .await;

        assert!(
            matches!(
                result,
                Err(IdentityServiceError::AlreadyApproved(DocumentKind::Kyc))
            ),
            "expected AlreadyApproved, got {result:?}"
        );
        assert!(ctx.evidence.uploaded_folders().is_empty());
        assert_eq!(
            ctx.users.get_user(renter.uuid).await?.kyc_status,
            KycStatus::Approved
        );

        Ok(())
    }

    #[tokio::test]
    async fn vendors_cannot_submit_kyc() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = create_verified_vendor(&ctx).await?;

        let result = ctx
            .identity
            .submit_document(&vendor, DocumentKind::Kyc, evidence_image(), Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(IdentityServiceError::WrongRole(DocumentKind::Kyc))),
            "expected WrongRole, got {result:?}"
        );
        assert!(ctx.evidence.uploaded_folders().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_upload_leaves_status_untouched() -> TestResult {
        let ctx = TestContext::new().await;
        let renter = ctx.users.create_user(new_user(Role::User)).await?;

        ctx.evidence.fail_uploads();

        let result = ctx
            .identity
            .submit_document(&renter, DocumentKind::Kyc, evidence_image(), Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(IdentityServiceError::Upload(_))),
            "expected Upload, got {result:?}"
        );

        let status = ctx
            .identity
            .document_status(&renter, DocumentKind::Kyc)
            .await?;

        assert_eq!(status.status, KycStatus::Unverified);
        assert_eq!(status.document, None);

        Ok(())
    }

    #[tokio::test]
    async fn vendor_resubmission_returns_to_pending_queue() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = ctx.users.create_user(new_user(Role::Vendor)).await?;

        ctx.users
            .set_verification_status(vendor.uuid, VerificationStatus::Rejected)
            .await?;

        assert!(ctx.users.list_pending_vendors().await?.is_empty());

        let status = ctx
            .identity
            .submit_document(
                &vendor,
                DocumentKind::Verification,
                evidence_image(),
                Timestamp::now(),
            )
            .await?;

        assert_eq!(status.status, VerificationStatus::Pending);
        assert_eq!(
            ctx.evidence.uploaded_folders(),
            vec![VENDOR_DOCUMENT_FOLDER.to_string()]
        );

        let pending = ctx.users.list_pending_vendors().await?;

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].uuid, vendor.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn renters_cannot_read_vendor_verification() -> TestResult {
        let ctx = TestContext::new().await;
        let renter = ctx.users.create_user(new_user(Role::User)).await?;

        let result = ctx
            .identity
            .document_status(&renter, DocumentKind::Verification)
            .await;

        assert!(
            matches!(
                result,
                Err(IdentityServiceError::WrongRole(DocumentKind::Verification))
            ),
            "expected WrongRole, got {result:?}"
        );

        Ok(())
    }
}
