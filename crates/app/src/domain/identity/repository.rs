//! Identity Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    identity::records::{DocumentKind, IdentityDocument},
    try_get_variant,
    users::records::UserUuid,
};

const UPSERT_DOCUMENT_SQL: &str = include_str!("sql/upsert_document.sql");
const GET_DOCUMENT_SQL: &str = include_str!("sql/get_document.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgIdentityRepository;

impl PgIdentityRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record `url` as the user's document of `kind`, replacing any earlier one.
    pub(crate) async fn upsert_document(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        kind: DocumentKind,
        url: &str,
        submitted_at: Timestamp,
    ) -> Result<IdentityDocument, sqlx::Error> {
        query_as::<Postgres, IdentityDocument>(UPSERT_DOCUMENT_SQL)
            .bind(user.into_uuid())
            .bind(kind.as_str())
            .bind(url)
            .bind(SqlxTimestamp::from(submitted_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_document(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        kind: DocumentKind,
    ) -> Result<Option<IdentityDocument>, sqlx::Error> {
        query_as::<Postgres, IdentityDocument>(GET_DOCUMENT_SQL)
            .bind(user.into_uuid())
            .bind(kind.as_str())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for IdentityDocument {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            kind: try_get_variant(row, "kind")?,
            document_url: row.try_get("document_url")?,
            submitted_at: row.try_get::<SqlxTimestamp, _>("submitted_at")?.to_jiff(),
        })
    }
}
