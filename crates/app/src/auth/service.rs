//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenSecret, ApiTokenVersion, AuthServiceError, IssuedApiToken,
        format_api_token, models::NewApiToken, parse_api_token, repository::PgAuthRepository,
        token_verifier, verifiers_match,
    },
    domain::users::records::{UserRecord, UserUuid},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UnknownUser`] if the user does not exist, or
    /// an error if the database insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = ApiTokenSecret::generate();
        let token = format_api_token(token_uuid, version, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid: user_uuid.into_uuid(),
                version,
                token_hash: token_verifier(token_uuid, version, user_uuid, &secret),
                expires_at,
            })
            .await?;

        tracing::info!(token = %token_uuid, user = %user_uuid, "api token issued");

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self
            .repository
            .list_user_api_tokens(user_uuid.into_uuid())
            .await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        let revoked = self.repository.revoke_api_token(token_uuid).await?;

        if revoked.is_some() {
            tracing::info!(token = %token_uuid, "api token revoked");
        }

        Ok(revoked.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserRecord, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let expected = token_verifier(
            parsed.token_uuid,
            parsed.version,
            token.user.uuid,
            &parsed.secret,
        );

        if token.version != parsed.version || !verifiers_match(&expected, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Best effort; a failed touch must not fail the request.
        if let Err(error) = self.repository.touch_api_token(parsed.token_uuid).await {
            tracing::warn!(token = %parsed.token_uuid, %error, "failed to record token use");
        }

        Ok(token.user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the account it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserRecord, AuthServiceError>;
}
