//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    try_get_variant,
    users::{
        data::NewUser,
        records::{KycStatus, PartySummary, UserRecord, UserUuid, VerificationStatus},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const SET_KYC_STATUS_SQL: &str = include_str!("sql/set_kyc_status.sql");
const SET_VERIFICATION_STATUS_SQL: &str = include_str!("sql/set_verification_status.sql");
const LIST_PENDING_VENDORS_SQL: &str = include_str!("sql/list_pending_vendors.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
        kyc_status: KycStatus,
        verification_status: VerificationStatus,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.role.as_str())
            .bind(kyc_status.as_str())
            .bind(verification_status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_kyc_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: KycStatus,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_KYC_STATUS_SQL)
            .bind(user.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `None` when the user is not a vendor.
    pub(crate) async fn set_verification_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: VerificationStatus,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_VERIFICATION_STATUS_SQL)
            .bind(user.into_uuid())
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_pending_vendors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_PENDING_VENDORS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: try_get_variant(row, "role")?,
            kyc_status: try_get_variant(row, "kyc_status")?,
            verification_status: try_get_variant(row, "verification_status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Read a joined user identity whose columns share `prefix`, e.g.
/// `customer_uuid`, `customer_name`, `customer_email`.
pub(crate) fn party_summary_from_row(row: &PgRow, prefix: &str) -> sqlx::Result<PartySummary> {
    Ok(PartySummary {
        uuid: UserUuid::from_uuid(row.try_get(format!("{prefix}_uuid").as_str())?),
        name: row.try_get(format!("{prefix}_name").as_str())?,
        email: row.try_get(format!("{prefix}_email").as_str())?,
    })
}
