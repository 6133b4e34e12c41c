//! Rentals Repository

use jiff::{Timestamp, civil::Date};
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    products::{records::ProductUuid, repository::product_summary_from_row},
    rentals::{
        records::{RejectionReason, RentalRecord, RentalUuid, ReturnRequestState},
        stats::PlatformStats,
        views::{DisputedRental, RenterRental, VendorRental},
    },
    try_get_variant,
    users::{records::UserUuid, repository::party_summary_from_row},
};

const CREATE_RENTAL_SQL: &str = include_str!("sql/create_rental.sql");
const GET_RENTER_RENTAL_SQL: &str = include_str!("sql/get_renter_rental.sql");
const LOCK_RENTER_RENTAL_SQL: &str = include_str!("sql/lock_renter_rental.sql");
const LOCK_VENDOR_RENTAL_SQL: &str = include_str!("sql/lock_vendor_rental.sql");
const ACTIVATE_RENTAL_SQL: &str = include_str!("sql/activate_rental.sql");
const SUBMIT_RETURN_REQUEST_SQL: &str = include_str!("sql/submit_return_request.sql");
const REJECT_RETURN_SQL: &str = include_str!("sql/reject_return.sql");
const COMPLETE_RENTAL_SQL: &str = include_str!("sql/complete_rental.sql");
const MARK_HANDED_OVER_SQL: &str = include_str!("sql/mark_handed_over.sql");
const LIST_RENTER_RENTALS_SQL: &str = include_str!("sql/list_renter_rentals.sql");
const LIST_VENDOR_RENTALS_SQL: &str = include_str!("sql/list_vendor_rentals.sql");
const LIST_DISPUTES_SQL: &str = include_str!("sql/list_disputes.sql");
const PLATFORM_STATS_SQL: &str = include_str!("sql/platform_stats.sql");

/// Columns written when a rental is first opened.
#[derive(Debug, Clone)]
pub(crate) struct RentalInsert<'a> {
    pub uuid: RentalUuid,
    pub renter: UserUuid,
    pub product: ProductUuid,
    pub start_date: Date,
    pub end_date: Date,
    pub total_amount: Decimal,
    pub payment_intent_id: &'a str,
    pub delivery_address: &'a str,
    pub contact_phone: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRentalsRepository;

impl PgRentalsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalInsert<'_>,
    ) -> Result<RentalRecord, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(CREATE_RENTAL_SQL)
            .bind(rental.uuid.into_uuid())
            .bind(rental.renter.into_uuid())
            .bind(rental.product.into_uuid())
            .bind(SqlxDate::from(rental.start_date))
            .bind(SqlxDate::from(rental.end_date))
            .bind(rental.total_amount)
            .bind(rental.payment_intent_id)
            .bind(rental.delivery_address)
            .bind(rental.contact_phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_renter_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        renter: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalRecord, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(GET_RENTER_RENTAL_SQL)
            .bind(rental.into_uuid())
            .bind(renter.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_renter_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        renter: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalRecord, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(LOCK_RENTER_RENTAL_SQL)
            .bind(rental.into_uuid())
            .bind(renter.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock a rental whose product belongs to `vendor`.
    pub(crate) async fn lock_vendor_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalRecord, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(LOCK_VENDOR_RENTAL_SQL)
            .bind(rental.into_uuid())
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// `pending -> active`. Returns `None` if the rental is no longer pending.
    pub(crate) async fn activate_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
    ) -> Result<Option<RentalRecord>, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(ACTIVATE_RENTAL_SQL)
            .bind(rental.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Open (or reopen after a rejection) a return request on an active rental.
    pub(crate) async fn submit_return_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        renter: UserUuid,
        rental: RentalUuid,
        note: &str,
        image_url: &str,
        requested_at: Timestamp,
    ) -> Result<Option<RentalRecord>, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(SUBMIT_RETURN_REQUEST_SQL)
            .bind(rental.into_uuid())
            .bind(renter.into_uuid())
            .bind(note)
            .bind(image_url)
            .bind(SqlxTimestamp::from(requested_at))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn reject_return(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        reason: &RejectionReason,
        note: Option<&str>,
    ) -> Result<Option<RentalRecord>, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(REJECT_RETURN_SQL)
            .bind(rental.into_uuid())
            .bind(reason.as_str())
            .bind(note)
            .fetch_optional(&mut **tx)
            .await
    }

    /// `active -> completed` with the return approved and the fine settled.
    pub(crate) async fn complete_rental(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        returned_at: Timestamp,
        fine_amount: Decimal,
    ) -> Result<Option<RentalRecord>, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(COMPLETE_RENTAL_SQL)
            .bind(rental.into_uuid())
            .bind(SqlxTimestamp::from(returned_at))
            .bind(fine_amount)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_handed_over(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rental: RentalUuid,
        handed_over_at: Timestamp,
    ) -> Result<Option<RentalRecord>, sqlx::Error> {
        query_as::<Postgres, RentalRecord>(MARK_HANDED_OVER_SQL)
            .bind(rental.into_uuid())
            .bind(SqlxTimestamp::from(handed_over_at))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_renter_rentals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        renter: UserUuid,
    ) -> Result<Vec<RenterRental>, sqlx::Error> {
        query_as::<Postgres, RenterRental>(LIST_RENTER_RENTALS_SQL)
            .bind(renter.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendor_rentals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
    ) -> Result<Vec<VendorRental>, sqlx::Error> {
        query_as::<Postgres, VendorRental>(LIST_VENDOR_RENTALS_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_disputes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<DisputedRental>, sqlx::Error> {
        query_as::<Postgres, DisputedRental>(LIST_DISPUTES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn platform_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<PlatformStats, sqlx::Error> {
        query_as::<Postgres, PlatformStats>(PLATFORM_STATS_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RentalRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rejection_reason = row
            .try_get::<Option<String>, _>("return_rejection_reason")?
            .as_deref()
            .and_then(RejectionReason::parse);

        Ok(Self {
            uuid: RentalUuid::from_uuid(row.try_get("uuid")?),
            renter_uuid: UserUuid::from_uuid(row.try_get("renter_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            start_date: row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
            status: try_get_variant(row, "status")?,
            total_amount: row.try_get("total_amount")?,
            payment_intent_id: row.try_get("payment_intent_id")?,
            delivery_address: row.try_get("delivery_address")?,
            contact_phone: row.try_get("contact_phone")?,
            handed_over_at: row
                .try_get::<Option<SqlxTimestamp>, _>("handed_over_at")?
                .map(SqlxTimestamp::to_jiff),
            returned_at: row
                .try_get::<Option<SqlxTimestamp>, _>("returned_at")?
                .map(SqlxTimestamp::to_jiff),
            fine_amount: row.try_get("fine_amount")?,
            daily_fine: row.try_get("daily_fine")?,
            return_request: ReturnRequestState {
                status: try_get_variant(row, "return_request_status")?,
                note: row.try_get("return_request_note")?,
                image_url: row.try_get("return_request_image_url")?,
                requested_at: row
                    .try_get::<Option<SqlxTimestamp>, _>("return_requested_at")?
                    .map(SqlxTimestamp::to_jiff),
                rejection_reason,
                rejection_note: row.try_get("return_rejection_note")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for RenterRental {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            rental: RentalRecord::from_row(row)?,
            product: product_summary_from_row(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VendorRental {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            rental: RentalRecord::from_row(row)?,
            product: product_summary_from_row(row)?,
            customer: party_summary_from_row(row, "customer")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DisputedRental {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            rental: RentalRecord::from_row(row)?,
            product: product_summary_from_row(row)?,
            customer: party_summary_from_row(row, "customer")?,
            vendor: party_summary_from_row(row, "vendor")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PlatformStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            users: try_get_count(row, "users")?,
            vendors: try_get_count(row, "vendors")?,
            products: try_get_count(row, "products")?,
            rentals: try_get_count(row, "rentals")?,
            pending_rentals: try_get_count(row, "pending_rentals")?,
            active_rentals: try_get_count(row, "active_rentals")?,
            completed_rentals: try_get_count(row, "completed_rentals")?,
            cancelled_rentals: try_get_count(row, "cancelled_rentals")?,
            revenue: row.try_get("revenue")?,
            pending_returns: try_get_count(row, "pending_returns")?,
            disputes: try_get_count(row, "disputes")?,
        })
    }
}

fn try_get_count(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let count: i64 = row.try_get(column)?;

    u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
