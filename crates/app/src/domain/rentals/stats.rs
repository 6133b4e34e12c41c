//! Rental aggregates.

use std::collections::HashSet;

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::rentals::{
    fines::Financials,
    records::{RentalRecord, RentalStatus},
};

/// Vendor dashboard totals computed over the rentals it lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorRentalStats {
    pub total: u64,
    pub pending: u64,
    pub active: u64,
    pub completed: u64,
    pub cancelled: u64,
    /// Sum of `total_amount` over active and completed rentals.
    pub revenue: Decimal,
    /// Live fines on active rentals plus settled fines on completed ones.
    pub outstanding_fines: Decimal,
    /// Active rentals past their end date.
    pub overdue: u64,
    pub unique_customers: u64,
}

impl VendorRentalStats {
    #[must_use]
    pub fn collect<'a, I>(rentals: I, now: Timestamp) -> Self
    where
        I: IntoIterator<Item = &'a RentalRecord>,
    {
        let mut stats = Self::default();
        let mut customers = HashSet::new();

        for rental in rentals {
            let financials = Financials::at(rental, now);

            stats.total += 1;

            match rental.status {
                RentalStatus::Pending => stats.pending += 1,
                RentalStatus::Active => stats.active += 1,
                RentalStatus::Completed => stats.completed += 1,
                RentalStatus::Cancelled => stats.cancelled += 1,
            }

            if matches!(rental.status, RentalStatus::Active | RentalStatus::Completed) {
                stats.revenue = stats.revenue.saturating_add(rental.total_amount);
            }

            // Only handed-over, paid rentals owe fines.
            if matches!(rental.status, RentalStatus::Active | RentalStatus::Completed) {
                stats.outstanding_fines = stats
                    .outstanding_fines
                    .saturating_add(financials.outstanding_fine);
            }

            if rental.status == RentalStatus::Active && financials.is_overdue {
                stats.overdue += 1;
            }

            customers.insert(rental.renter_uuid);
        }

        stats.unique_customers = customers.len() as u64;

        stats
    }
}

/// Platform-wide counters for the superadmin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformStats {
    pub users: u64,
    pub vendors: u64,
    pub products: u64,
    pub rentals: u64,
    pub pending_rentals: u64,
    pub active_rentals: u64,
    pub completed_rentals: u64,
    pub cancelled_rentals: u64,
    /// Sum of `total_amount` over active and completed rentals.
    pub revenue: Decimal,
    pub pending_returns: u64,
    /// Rentals whose latest return request was rejected.
    pub disputes: u64,
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, civil::date};

    use crate::domain::{
        products::records::ProductUuid,
        rentals::records::{RentalUuid, ReturnRequestState},
        users::records::UserUuid,
    };

    use super::*;

    fn rental(renter: UserUuid, status: RentalStatus, total: i64) -> RentalRecord {
        let created = Timestamp::UNIX_EPOCH;

        RentalRecord {
            uuid: RentalUuid::new(),
            renter_uuid: renter,
            product_uuid: ProductUuid::new(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 5),
            status,
            total_amount: Decimal::from(total),
            payment_intent_id: "pi_test".to_string(),
            delivery_address: "1 Main Street".to_string(),
            contact_phone: "5550100".to_string(),
            handed_over_at: None,
            returned_at: None,
            fine_amount: Decimal::ZERO,
            daily_fine: Decimal::from(100),
            return_request: ReturnRequestState::default(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn empty_dashboard_is_all_zero() {
        let none: [RentalRecord; 0] = [];

        let stats = VendorRentalStats::collect(&none, Timestamp::UNIX_EPOCH);

        assert_eq!(stats, VendorRentalStats::default());
    }

    #[test]
    fn revenue_counts_active_and_completed_only() {
        let renter = UserUuid::new();

        let rentals = [
            rental(renter, RentalStatus::Pending, 10),
            rental(renter, RentalStatus::Active, 20),
            rental(renter, RentalStatus::Completed, 40),
            rental(renter, RentalStatus::Cancelled, 80),
        ];

        let before_due = rentals[0].due_at() - SignedDuration::from_hours(1);
        let stats = VendorRentalStats::collect(&rentals, before_due);

        assert_eq!(stats.total, 4);
        assert_eq!(
            (stats.pending, stats.active, stats.completed, stats.cancelled),
            (1, 1, 1, 1)
        );
        assert_eq!(stats.revenue, Decimal::from(60));
        assert_eq!(stats.unique_customers, 1);
        assert_eq!(stats.overdue, 0);
        assert_eq!(stats.outstanding_fines, Decimal::ZERO);
    }

    #[test]
    fn overdue_rentals_accrue_live_fines() {
        let first = UserUuid::new();
        let second = UserUuid::new();

        let mut returned = rental(second, RentalStatus::Completed, 50);
        returned.returned_at = Some(returned.due_at() + SignedDuration::from_hours(24));
        returned.fine_amount = Decimal::from(100);

        let rentals = [rental(first, RentalStatus::Active, 50), returned];

        let two_days_late = rentals[0].due_at() + SignedDuration::from_hours(48);
        let stats = VendorRentalStats::collect(&rentals, two_days_late);

        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.outstanding_fines, Decimal::from(300));
        assert_eq!(stats.unique_customers, 2);
    }

    #[test]
    fn unpaid_and_cancelled_rentals_never_accrue() {
        let renter = UserUuid::new();

        let rentals = [
            rental(renter, RentalStatus::Pending, 10),
            rental(renter, RentalStatus::Cancelled, 10),
        ];

        let week_late = rentals[0].due_at() + SignedDuration::from_hours(24 * 7);
        let stats = VendorRentalStats::collect(&rentals, week_late);

        assert_eq!(stats.overdue, 0);
        assert_eq!(stats.outstanding_fines, Decimal::ZERO);
        assert_eq!((stats.pending, stats.cancelled), (1, 1));
    }
}
