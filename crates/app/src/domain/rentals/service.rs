//! Rentals service.

use std::{collections::BTreeMap, fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{Span, Timestamp};
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::{
        products::{records::ProductStatus, repository::PgProductsRepository},
        rentals::{
            data::{CreatedRental, NewRental, RentalDays, ReturnRejection, ReturnRequest},
            errors::RentalsServiceError,
            fines::settlement_fine,
            records::{RentalRecord, RentalStatus, RentalUuid, ReturnRequestStatus},
            repository::{PgRentalsRepository, RentalInsert},
            stats::{PlatformStats, VendorRentalStats},
            views::{DisputedRental, RenterRental, VendorDashboard},
        },
        users::records::UserRecord,
    },
    payments::{CreateIntent, PaymentGateway, to_minor_units},
    storage::{EvidenceStore, RETURN_EVIDENCE_FOLDER},
};

#[derive(Clone)]
pub struct PgRentalsService {
    db: Db,
    rentals: PgRentalsRepository,
    products: PgProductsRepository,
    payments: Arc<dyn PaymentGateway>,
    evidence: Arc<dyn EvidenceStore>,
    currency: String,
}

impl PgRentalsService {
    /// `currency` is the ISO code payment intents are opened in, e.g. `"usd"`.
    #[must_use]
    pub fn new(
        db: Db,
        payments: Arc<dyn PaymentGateway>,
        evidence: Arc<dyn EvidenceStore>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            db,
            rentals: PgRentalsRepository::new(),
            products: PgProductsRepository::new(),
            payments,
            evidence,
            currency: currency.into(),
        }
    }
}

impl fmt::Debug for PgRentalsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRentalsService")
            .field("db", &self.db)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

/// `price_per_day × days + refundable_deposit`.
///
/// # Errors
///
/// Returns [`RentalsServiceError::Validation`] if the total overflows.
pub fn rental_total(
    price_per_day: Decimal,
    refundable_deposit: Decimal,
    days: RentalDays,
) -> Result<Decimal, RentalsServiceError> {
    price_per_day
        .checked_mul(Decimal::from(days.get()))
        .and_then(|rent| rent.checked_add(refundable_deposit))
        .ok_or_else(|| RentalsServiceError::validation("rental total is out of range"))
}

fn product_lookup(error: sqlx::Error) -> RentalsServiceError {
    match error {
        sqlx::Error::RowNotFound => RentalsServiceError::ProductNotFound,
        other => other.into(),
    }
}

#[async_trait]
impl RentalsService for PgRentalsService {
    async fn create_rental(
        &self,
        renter: &UserRecord,
        rental: NewRental,
    ) -> Result<CreatedRental, RentalsServiceError> {
        if !renter.can_rent() {
            return Err(RentalsServiceError::PreconditionFailed(
                "KYC approval is required before renting a product",
            ));
        }

        rental.validate()?;

        let mut tx = self.db.begin().await?;

        let product = self
            .products
            .get_product(&mut tx, rental.product_uuid)
            .await
            .map_err(product_lookup)?;

        tx.commit().await?;

        if product.status != ProductStatus::Available {
            return Err(RentalsServiceError::InvalidState(
                "product is not available for rent",
            ));
        }

        let end_date = rental
            .start_date
            .checked_add(Span::new().days(i64::from(rental.days.get())))
            .map_err(|_| RentalsServiceError::validation("rental ends outside the calendar"))?;

        let total_amount = rental_total(
            product.price_per_day,
            product.refundable_deposit,
            rental.days,
        )?;

        let amount_minor = to_minor_units(total_amount)
            .map_err(|_| RentalsServiceError::validation("rental total cannot be charged"))?;

        let intent = self
            .payments
            .create_intent(CreateIntent {
                amount_minor,
                currency: self.currency.clone(),
                metadata: BTreeMap::from([
                    ("product_uuid".to_string(), product.uuid.to_string()),
                    ("renter_uuid".to_string(), renter.uuid.to_string()),
                ]),
            })
            .await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .rentals
            .create_rental(
                &mut tx,
                RentalInsert {
                    uuid: RentalUuid::new(),
                    renter: renter.uuid,
                    product: product.uuid,
                    start_date: rental.start_date,
                    end_date,
                    total_amount,
                    payment_intent_id: &intent.id,
                    delivery_address: rental.delivery_address.trim(),
                    contact_phone: rental.contact_phone.trim(),
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            rental = %created.uuid,
            product = %created.product_uuid,
            renter = %renter.uuid,
            intent = %intent.id,
            "rental created"
        );

        Ok(CreatedRental {
            rental: created,
            client_secret: intent.client_secret,
        })
    }

    async fn confirm_rental(
        &self,
        renter: &UserRecord,
        rental: RentalUuid,
    ) -> Result<RentalRecord, RentalsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .rentals
            .get_renter_rental(&mut tx, renter.uuid, rental)
            .await?;

        tx.commit().await?;

        current.status.transition_to(RentalStatus::Active)?;

        let payment = self
            .payments
            .retrieve_intent(&current.payment_intent_id)
            .await?;

        if !payment.is_settled() {
            return Err(RentalsServiceError::PreconditionFailed(
                "payment not completed for this rental",
            ));
        }

        let mut tx = self.db.begin().await?;

        let locked = self
            .rentals
            .lock_renter_rental(&mut tx, renter.uuid, rental)
            .await?;

        locked.status.transition_to(RentalStatus::Active)?;

        let product = self
            .products
            .lock_product(&mut tx, locked.product_uuid)
            .await
            .map_err(product_lookup)?;

        if product.status != ProductStatus::Available {
            return Err(RentalsServiceError::InvalidState(
                "product is no longer available",
            ));
        }

        let activated = self
            .rentals
            .activate_rental(&mut tx, rental)
            .await?
            .ok_or(RentalsServiceError::InvalidState(
                "rental is no longer pending",
            ))?;

        self.products
            .set_product_status(&mut tx, product.uuid, ProductStatus::Rented)
            .await?;

        tx.commit().await?;

        tracing::info!(
            rental = %activated.uuid,
            product = %activated.product_uuid,
            "rental activated"
        );

        Ok(activated)
    }

    async fn request_return(
        &self,
        renter: &UserRecord,
        rental: RentalUuid,
        request: ReturnRequest,
        now: Timestamp,
    ) -> Result<RentalRecord, RentalsServiceError> {
        request.validate()?;

        let mut tx = self.db.begin().await?;

        let current = self
            .rentals
            .get_renter_rental(&mut tx, renter.uuid, rental)
            .await?;

        tx.commit().await?;

        if current.status != RentalStatus::Active {
            return Err(RentalsServiceError::InvalidState(
                "only active rentals can request a return",
            ));
        }

        current
            .return_request
            .status
            .transition_to(ReturnRequestStatus::Pending)?;

        let stored = self
            .evidence
            .upload(request.image, RETURN_EVIDENCE_FOLDER)
            .await?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .rentals
            .submit_return_request(
                &mut tx,
                renter.uuid,
                rental,
                request.note.trim(),
                &stored.url,
                now,
            )
            .await?
            .ok_or(RentalsServiceError::InvalidState(
                "rental changed while the return request was submitted",
            ))?;

        tx.commit().await?;

        tracing::info!(
            rental = %updated.uuid,
            product = %updated.product_uuid,
            "return requested"
        );

        Ok(updated)
    }

    async fn reject_return(
        &self,
        vendor: &UserRecord,
        rental: RentalUuid,
        rejection: ReturnRejection,
    ) -> Result<RentalRecord, RentalsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .rentals
            .lock_vendor_rental(&mut tx, vendor.uuid, rental)
            .await?;

        current
            .return_request
            .status
            .transition_to(ReturnRequestStatus::Rejected)?;

        let updated = self
            .rentals
            .reject_return(
                &mut tx,
                rental,
                &rejection.reason,
                rejection.note.as_deref(),
            )
            .await?
            .ok_or(RentalsServiceError::InvalidState(
                "return request is no longer pending",
            ))?;

        tx.commit().await?;

        tracing::info!(
            rental = %updated.uuid,
            product = %updated.product_uuid,
            reason = %rejection.reason,
            "return rejected"
        );

        Ok(updated)
    }

    async fn approve_return(
        &self,
        vendor: &UserRecord,
        rental: RentalUuid,
        now: Timestamp,
    ) -> Result<RentalRecord, RentalsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .rentals
            .lock_vendor_rental(&mut tx, vendor.uuid, rental)
            .await?;

        current
            .return_request
            .status
            .transition_to(ReturnRequestStatus::Approved)?;

        current.status.transition_to(RentalStatus::Completed)?;

        let product = self
            .products
            .lock_product(&mut tx, current.product_uuid)
            .await
            .map_err(product_lookup)?;

        let fine = settlement_fine(&current, now);

        let completed = self
            .rentals
            .complete_rental(&mut tx, rental, now, fine)
            .await?
            .ok_or(RentalsServiceError::InvalidState(
                "return request is no longer pending",
            ))?;

        self.products
            .set_product_status(&mut tx, product.uuid, ProductStatus::Available)
            .await?;

        tx.commit().await?;

        tracing::info!(
            rental = %completed.uuid,
            product = %completed.product_uuid,
            fine = %completed.fine_amount,
            "return approved"
        );

        Ok(completed)
    }

    async fn mark_handed_over(
        &self,
        vendor: &UserRecord,
        rental: RentalUuid,
        now: Timestamp,
    ) -> Result<RentalRecord, RentalsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .rentals
            .lock_vendor_rental(&mut tx, vendor.uuid, rental)
            .await?;

        if current.status != RentalStatus::Active {
            return Err(RentalsServiceError::InvalidState(
                "only active rentals can be handed over",
            ));
        }

        if current.handed_over_at.is_some() {
            return Err(RentalsServiceError::InvalidState(
                "rental has already been handed over",
            ));
        }

        let updated = self
            .rentals
            .mark_handed_over(&mut tx, rental, now)
            .await?
            .ok_or(RentalsServiceError::InvalidState(
                "rental changed while it was being handed over",
            ))?;

        tx.commit().await?;

        tracing::info!(
            rental = %updated.uuid,
            product = %updated.product_uuid,
            "rental handed over"
        );

        Ok(updated)
    }

    async fn list_renter_rentals(
        &self,
        renter: &UserRecord,
    ) -> Result<Vec<RenterRental>, RentalsServiceError> {
        let mut tx = self.db.begin().await?;

        let rentals = self
            .rentals
            .list_renter_rentals(&mut tx, renter.uuid)
            .await?;

        tx.commit().await?;

        Ok(rentals)
    }

    async fn vendor_dashboard(
        &self,
        vendor: &UserRecord,
        now: Timestamp,
    ) -> Result<VendorDashboard, RentalsServiceError> {
        let mut tx = self.db.begin().await?;

        let rentals = self
            .rentals
            .list_vendor_rentals(&mut tx, vendor.uuid)
            .await?;

        tx.commit().await?;

        let stats = VendorRentalStats::collect(rentals.iter().map(|row| &row.rental), now);

        Ok(VendorDashboard { rentals, stats })
    }

    async fn list_disputes(&self) -> Result<Vec<DisputedRental>, RentalsServiceError> {
        let mut tx = self.db.begin().await?;

        let disputes = self.rentals.list_disputes(&mut tx).await?;

        tx.commit().await?;

        Ok(disputes)
    }

    async fn platform_stats(&self) -> Result<PlatformStats, RentalsServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.rentals.platform_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait RentalsService: Send + Sync {
    /// Open a `pending` rental and a payment intent for its total.
    async fn create_rental(
        &self,
        renter: &UserRecord,
        rental: NewRental,
    ) -> Result<CreatedRental, RentalsServiceError>;

    /// Activate a pending rental once its payment has succeeded, marking the
    /// product rented.
    async fn confirm_rental(
        &self,
        renter: &UserRecord,
        rental: RentalUuid,
    ) -> Result<RentalRecord, RentalsServiceError>;

    /// Submit (or resubmit after a rejection) a return request with evidence.
    async fn request_return(
        &self,
        renter: &UserRecord,
        rental: RentalUuid,
        request: ReturnRequest,
        now: Timestamp,
    ) -> Result<RentalRecord, RentalsServiceError>;

    /// Refuse a pending return request. The rental stays active.
    async fn reject_return(
        &self,
        vendor: &UserRecord,
        rental: RentalUuid,
        rejection: ReturnRejection,
    ) -> Result<RentalRecord, RentalsServiceError>;

    /// Accept a pending return: settle the fine, complete the rental and
    /// release the product.
    async fn approve_return(
        &self,
        vendor: &UserRecord,
        rental: RentalUuid,
        now: Timestamp,
    ) -> Result<RentalRecord, RentalsServiceError>;

    /// Record that the vendor delivered the item.
    async fn mark_handed_over(
        &self,
        vendor: &UserRecord,
        rental: RentalUuid,
        now: Timestamp,
    ) -> Result<RentalRecord, RentalsServiceError>;

    /// The renter's rentals, newest first.
    async fn list_renter_rentals(
        &self,
        renter: &UserRecord,
    ) -> Result<Vec<RenterRental>, RentalsServiceError>;

    /// Rentals of the vendor's products with aggregates as of `now`.
    async fn vendor_dashboard(
        &self,
        vendor: &UserRecord,
        now: Timestamp,
    ) -> Result<VendorDashboard, RentalsServiceError>;

    /// Rentals with a return request under review or decided.
    async fn list_disputes(&self) -> Result<Vec<DisputedRental>, RentalsServiceError>;

    async fn platform_stats(&self) -> Result<PlatformStats, RentalsServiceError>;
}
