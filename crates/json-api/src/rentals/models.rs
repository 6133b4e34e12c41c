//! Rental Models

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rentreturn_app::domain::{
    rentals::{
        data::CreatedRental,
        fines::Financials,
        records::{RentalRecord, ReturnRequestState},
        stats::VendorRentalStats,
        views::{DisputedRental, RenterRental, VendorDashboard},
    },
    users::records::PartySummary,
};

use crate::products::models::ProductSummaryResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnRequestResponse {
    /// One of `none`, `pending`, `approved` or `rejected`
    pub status: String,
    pub note: Option<String>,
    pub image_url: Option<String>,
    pub requested_at: Option<String>,
    pub rejection_reason: Option<String>,
    pub rejection_note: Option<String>,
}

impl From<ReturnRequestState> for ReturnRequestResponse {
    fn from(request: ReturnRequestState) -> Self {
        Self {
            status: request.status.to_string(),
            note: request.note,
            image_url: request.image_url,
            requested_at: request.requested_at.map(|at| at.to_string()),
            rejection_reason: request.rejection_reason.map(|reason| reason.to_string()),
            rejection_note: request.rejection_note,
        }
    }
}

/// Fines projected at the request's reference instant.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FinancialsResponse {
    pub due_at: String,
    pub overdue_days: i64,
    pub is_overdue: bool,
    pub daily_fine: String,
    pub calculated_fine: String,
    pub settled_fine: String,
    pub outstanding_fine: String,
}

impl From<Financials> for FinancialsResponse {
    fn from(financials: Financials) -> Self {
        Self {
            due_at: financials.due_at.to_string(),
            overdue_days: financials.overdue_days,
            is_overdue: financials.is_overdue,
            daily_fine: financials.daily_fine.to_string(),
            calculated_fine: financials.calculated_fine.to_string(),
            settled_fine: financials.settled_fine.to_string(),
            outstanding_fine: financials.outstanding_fine.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RentalResponse {
    pub uuid: Uuid,
    pub renter_uuid: Uuid,
    pub product_uuid: Uuid,
    pub start_date: String,
    pub end_date: String,

    /// One of `pending`, `active`, `completed` or `cancelled`
    pub status: String,

    /// `price_per_day × days + refundable_deposit`, fixed at creation
    pub total_amount: String,
    pub payment_intent_id: String,
    pub delivery_address: String,
    pub contact_phone: String,
    pub handed_over_at: Option<String>,
    pub returned_at: Option<String>,
    pub return_request: ReturnRequestResponse,
    pub financials: FinancialsResponse,
    pub created_at: String,
    pub updated_at: String,
}

impl RentalResponse {
    pub(crate) fn at(rental: RentalRecord, reference: Timestamp) -> Self {
        let financials = Financials::at(&rental, reference).into();

        Self {
            uuid: rental.uuid.into_uuid(),
            renter_uuid: rental.renter_uuid.into_uuid(),
            product_uuid: rental.product_uuid.into_uuid(),
            start_date: rental.start_date.to_string(),
            end_date: rental.end_date.to_string(),
            status: rental.status.to_string(),
            total_amount: rental.total_amount.to_string(),
            payment_intent_id: rental.payment_intent_id,
            delivery_address: rental.delivery_address,
            contact_phone: rental.contact_phone,
            handed_over_at: rental.handed_over_at.map(|at| at.to_string()),
            returned_at: rental.returned_at.map(|at| at.to_string()),
            return_request: rental.return_request.into(),
            financials,
            created_at: rental.created_at.to_string(),
            updated_at: rental.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PartyResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<PartySummary> for PartyResponse {
    fn from(party: PartySummary) -> Self {
        Self {
            uuid: party.uuid.into_uuid(),
            name: party.name,
            email: party.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RentalEnvelope {
    pub success: bool,
    pub rental: RentalResponse,
}

impl RentalEnvelope {
    pub(crate) fn at(rental: RentalRecord, reference: Timestamp) -> Self {
        Self {
            success: true,
            rental: RentalResponse::at(rental, reference),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatedRentalEnvelope {
    pub success: bool,
    pub rental: RentalResponse,

    /// Handed to the payment widget to collect the rental total
    pub client_secret: String,
}

impl CreatedRentalEnvelope {
    pub(crate) fn at(created: CreatedRental, reference: Timestamp) -> Self {
        Self {
            success: true,
            rental: RentalResponse::at(created.rental, reference),
            client_secret: created.client_secret,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RenterRentalResponse {
    pub rental: RentalResponse,
    pub product: ProductSummaryResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RenterRentalsEnvelope {
    pub success: bool,
    pub rentals: Vec<RenterRentalResponse>,
}

impl RenterRentalsEnvelope {
    pub(crate) fn at(rentals: Vec<RenterRental>, reference: Timestamp) -> Self {
        Self {
            success: true,
            rentals: rentals
                .into_iter()
                .map(|row| RenterRentalResponse {
                    rental: RentalResponse::at(row.rental, reference),
                    product: row.product.into(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorRentalResponse {
    pub rental: RentalResponse,
    pub product: ProductSummaryResponse,
    pub customer: PartyResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorStatsResponse {
    pub total: u64,
    pub pending: u64,
    pub active: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub revenue: String,
    pub outstanding_fines: String,
    pub overdue: u64,
    pub unique_customers: u64,
}

impl From<VendorRentalStats> for VendorStatsResponse {
    fn from(stats: VendorRentalStats) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            active: stats.active,
            completed: stats.completed,
            cancelled: stats.cancelled,
            revenue: stats.revenue.to_string(),
            outstanding_fines: stats.outstanding_fines.to_string(),
            overdue: stats.overdue,
            unique_customers: stats.unique_customers,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorDashboardEnvelope {
    pub success: bool,
    pub rentals: Vec<VendorRentalResponse>,
    pub stats: VendorStatsResponse,
}

impl VendorDashboardEnvelope {
    pub(crate) fn at(dashboard: VendorDashboard, reference: Timestamp) -> Self {
        Self {
            success: true,
            rentals: dashboard
                .rentals
                .into_iter()
                .map(|row| VendorRentalResponse {
                    rental: RentalResponse::at(row.rental, reference),
                    product: row.product.into(),
                    customer: row.customer.into(),
                })
                .collect(),
            stats: dashboard.stats.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DisputeResponse {
    pub rental: RentalResponse,
    pub product: ProductSummaryResponse,
    pub customer: PartyResponse,
    pub vendor: PartyResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DisputesEnvelope {
    pub success: bool,
    pub rentals: Vec<DisputeResponse>,
}

impl DisputesEnvelope {
    pub(crate) fn at(disputes: Vec<DisputedRental>, reference: Timestamp) -> Self {
        Self {
            success: true,
            rentals: disputes
                .into_iter()
                .map(|row| DisputeResponse {
                    rental: RentalResponse::at(row.rental, reference),
                    product: row.product.into(),
                    customer: row.customer.into(),
                    vendor: row.vendor.into(),
                })
                .collect(),
        }
    }
}
