//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{KycStatus, Role, UserRecord, UserUuid, VerificationStatus},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        // Vendors enter the review queue on sign-up, everyone else starts unverified.
        let verification_status = match user.role {
            Role::Vendor => VerificationStatus::Pending,
            Role::User | Role::Admin | Role::Superadmin => VerificationStatus::Unverified,
        };

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, &user, KycStatus::Unverified, verification_status)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn set_kyc_status(
        &self,
        user: UserUuid,
        status: KycStatus,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_kyc_status(&mut tx, user, status).await?;

        tx.commit().await?;

        tracing::info!(user = %updated.uuid, kyc_status = %status, "kyc status updated");

        Ok(updated)
    }

    async fn set_verification_status(
        &self,
        user: UserUuid,
        status: VerificationStatus,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(updated) = self
            .repository
            .set_verification_status(&mut tx, user, status)
            .await?
        else {
            // Distinguish "no such user" from "user exists but is not a vendor".
            self.repository.get_user(&mut tx, user).await?;

            return Err(UsersServiceError::NotVendor);
        };

        tx.commit().await?;

        tracing::info!(
            user = %updated.uuid,
            verification_status = %status,
            "vendor verification updated"
        );

        Ok(updated)
    }

    async fn list_pending_vendors(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let vendors = self.repository.list_pending_vendors(&mut tx).await?;

        tx.commit().await?;

        Ok(vendors)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register an account. Vendors start with a pending verification.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Record the outcome of a renter's KYC review.
    async fn set_kyc_status(
        &self,
        user: UserUuid,
        status: KycStatus,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Record the outcome of a vendor's document review.
    async fn set_verification_status(
        &self,
        user: UserUuid,
        status: VerificationStatus,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Vendors awaiting document review, oldest first.
    async fn list_pending_vendors(&self) -> Result<Vec<UserRecord>, UsersServiceError>;
}
