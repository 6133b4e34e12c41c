//! Overdue fines.
//!
//! Live dashboards and return settlement both go through [`fine_at`], so the
//! amount a vendor sees accruing is exactly the amount persisted on approval.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::rentals::records::RentalRecord;

const NANOS_PER_DAY: i128 = 86_400 * 1_000_000_000;

/// Whole days (rounded up) that `reference` falls after `due_at`, never negative.
#[must_use]
pub fn overdue_days(due_at: Timestamp, reference: Timestamp) -> i64 {
    let elapsed = reference.as_nanosecond() - due_at.as_nanosecond();

    if elapsed <= 0 {
        return 0;
    }

    let days = (elapsed + NANOS_PER_DAY - 1) / NANOS_PER_DAY;

    i64::try_from(days).unwrap_or(i64::MAX)
}

/// `overdue_days × daily_fine`, saturating at [`Decimal::MAX`].
#[must_use]
pub fn fine_for(overdue_days: i64, daily_fine: Decimal) -> Decimal {
    Decimal::from(overdue_days)
        .checked_mul(daily_fine)
        .unwrap_or(Decimal::MAX)
}

/// The fine a rental has accrued as of `reference`.
#[must_use]
pub fn fine_at(rental: &RentalRecord, reference: Timestamp) -> Decimal {
    fine_for(overdue_days(rental.due_at(), reference), rental.daily_fine)
}

/// The fine to persist when a return is approved at `approved_at`.
#[must_use]
pub fn settlement_fine(rental: &RentalRecord, approved_at: Timestamp) -> Decimal {
    fine_at(rental, approved_at)
}

/// Read-time financial projection of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Financials {
    pub due_at: Timestamp,
    pub overdue_days: i64,
    /// Past due and not yet returned.
    pub is_overdue: bool,
    pub daily_fine: Decimal,
    pub calculated_fine: Decimal,
    pub settled_fine: Decimal,
    /// The settled fine once returned, the accruing fine before that.
    pub outstanding_fine: Decimal,
}

impl Financials {
    /// Project `rental` at `reference`. A returned rental is measured at its
    /// return instant instead, so its figures stop moving.
    #[must_use]
    pub fn at(rental: &RentalRecord, reference: Timestamp) -> Self {
        let effective = rental.returned_at.unwrap_or(reference);
        let due_at = rental.due_at();
        let overdue_days = overdue_days(due_at, effective);
        let calculated_fine = fine_at(rental, effective);

        Self {
            due_at,
            overdue_days,
            is_overdue: overdue_days > 0 && !rental.is_returned(),
            daily_fine: rental.daily_fine,
            calculated_fine,
            settled_fine: rental.fine_amount,
            outstanding_fine: if rental.is_returned() {
                rental.fine_amount
            } else {
                calculated_fine
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, civil::date};

    use crate::domain::{
        products::records::ProductUuid,
        rentals::records::{RentalStatus, RentalUuid, ReturnRequestState},
        users::records::UserUuid,
    };

    use super::*;

    fn rental(daily_fine: i64) -> RentalRecord {
        let created = Timestamp::UNIX_EPOCH;

        RentalRecord {
            uuid: RentalUuid::new(),
            renter_uuid: UserUuid::new(),
            product_uuid: ProductUuid::new(),
            start_date: date(2024, 5, 1),
            end_date: date(2024, 5, 4),
            status: RentalStatus::Active,
            total_amount: Decimal::from(80),
            payment_intent_id: "pi_test".to_string(),
            delivery_address: "1 Main Street".to_string(),
            contact_phone: "5550100".to_string(),
            handed_over_at: None,
            returned_at: None,
            fine_amount: Decimal::ZERO,
            daily_fine: Decimal::from(daily_fine),
            return_request: ReturnRequestState::default(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn no_days_overdue_up_to_due_instant() {
        let due = Timestamp::UNIX_EPOCH;

        assert_eq!(overdue_days(due, due - SignedDuration::from_hours(30)), 0);
        assert_eq!(overdue_days(due, due), 0);
    }

    #[test]
    fn partial_days_round_up() {
        let due = Timestamp::UNIX_EPOCH;

        assert_eq!(overdue_days(due, due + SignedDuration::from_nanos(1)), 1);
        assert_eq!(overdue_days(due, due + SignedDuration::from_hours(24)), 1);
        assert_eq!(overdue_days(due, due + SignedDuration::from_hours(25)), 2);
    }

    #[test]
    fn fine_is_zero_before_due_date() {
        let rental = rental(100);

        assert_eq!(fine_at(&rental, rental.due_at()), Decimal::ZERO);
        assert_eq!(
            fine_at(&rental, rental.due_at() - SignedDuration::from_hours(1)),
            Decimal::ZERO
        );
    }

    #[test]
    fn five_days_late_at_default_rate_costs_five_hundred() {
        let rental = rental(100);
        let approved_at = rental.due_at() + SignedDuration::from_hours(24 * 5);

        assert_eq!(settlement_fine(&rental, approved_at), Decimal::from(500));
        assert_eq!(
            settlement_fine(&rental, approved_at),
            settlement_fine(&rental, approved_at)
        );
    }

    #[test]
    fn live_projection_matches_settlement() {
        let rental = rental(100);
        let now = rental.due_at() + SignedDuration::from_hours(50);

        let financials = Financials::at(&rental, now);

        assert_eq!(financials.overdue_days, 3);
        assert!(financials.is_overdue);
        assert_eq!(financials.outstanding_fine, settlement_fine(&rental, now));
    }

    #[test]
    fn returned_rental_reports_settled_fine() {
        let mut rental = rental(100);
        let returned_at = rental.due_at() + SignedDuration::from_hours(24 * 2);

        rental.returned_at = Some(returned_at);
        rental.fine_amount = Decimal::from(200);

        let much_later = returned_at + SignedDuration::from_hours(24 * 30);
        let financials = Financials::at(&rental, much_later);

        assert_eq!(financials.overdue_days, 2);
        assert!(!financials.is_overdue);
        assert_eq!(financials.calculated_fine, Decimal::from(200));
        assert_eq!(financials.outstanding_fine, Decimal::from(200));
    }

    #[test]
    fn huge_fines_saturate() {
        assert_eq!(fine_for(i64::MAX, Decimal::MAX), Decimal::MAX);
    }
}
