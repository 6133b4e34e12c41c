//! Admin Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rentreturn_app::domain::{rentals::stats::PlatformStats, users::records::UserRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub kyc_status: String,
    pub verification_status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            kyc_status: user.kyc_status.to_string(),
            verification_status: user.verification_status.to_string(),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserEnvelope {
    pub success: bool,
    pub user: UserResponse,
}

impl From<UserRecord> for UserEnvelope {
    fn from(user: UserRecord) -> Self {
        Self {
            success: true,
            user: user.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersEnvelope {
    pub success: bool,
    pub users: Vec<UserResponse>,
}

/// Review outcome for KYC or vendor verification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewRequest {
    /// One of `unverified`, `pending`, `approved` or `rejected`
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlatformStatsResponse {
    pub users: u64,
    pub vendors: u64,
    pub products: u64,
    pub rentals: u64,
    pub pending_rentals: u64,
    pub active_rentals: u64,
    pub completed_rentals: u64,
    pub cancelled_rentals: u64,
    pub revenue: String,
    pub pending_returns: u64,
    pub disputes: u64,
}

impl From<PlatformStats> for PlatformStatsResponse {
    fn from(stats: PlatformStats) -> Self {
        Self {
            users: stats.users,
            vendors: stats.vendors,
            products: stats.products,
            rentals: stats.rentals,
            pending_rentals: stats.pending_rentals,
            active_rentals: stats.active_rentals,
            completed_rentals: stats.completed_rentals,
            cancelled_rentals: stats.cancelled_rentals,
            revenue: stats.revenue.to_string(),
            pending_returns: stats.pending_returns,
            disputes: stats.disputes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsEnvelope {
    pub success: bool,
    pub stats: PlatformStatsResponse,
}
