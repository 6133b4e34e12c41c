//! Role-scoped rental views.

use crate::domain::{
    products::records::ProductSummary,
    rentals::{records::RentalRecord, stats::VendorRentalStats},
    users::records::PartySummary,
};

/// A renter's own rental with the product it is for.
#[derive(Debug, Clone, PartialEq)]
pub struct RenterRental {
    pub rental: RentalRecord,
    pub product: ProductSummary,
}

/// A rental of one of the vendor's products together with who rented it.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRental {
    pub rental: RentalRecord,
    pub product: ProductSummary,
    pub customer: PartySummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorDashboard {
    pub rentals: Vec<VendorRental>,
    pub stats: VendorRentalStats,
}

/// A rental under return review, with both parties identified.
#[derive(Debug, Clone, PartialEq)]
pub struct DisputedRental {
    pub rental: RentalRecord,
    pub product: ProductSummary,
    pub customer: PartySummary,
    pub vendor: PartySummary,
}
