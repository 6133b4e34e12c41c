//! Payment gateway

use std::collections::BTreeMap;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

mod errors;
mod stripe;

pub use errors::PaymentsError;
pub use stripe::{DEFAULT_STRIPE_API_BASE, StripeClient, StripeConfig};

/// A request to collect `amount_minor` of `currency` from the renter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIntent {
    /// Amount in the currency's minor unit, e.g. cents.
    pub amount_minor: i64,
    pub currency: String,
    pub metadata: BTreeMap<String, String>,
}

/// A created payment intent. `client_secret` lets the client finish payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentIntentStatus {
    Succeeded,
    Processing,
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    RequiresCapture,
    Canceled,
    Other(String),
}

impl PaymentIntentStatus {
    /// Only a succeeded intent counts as paid.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl From<&str> for PaymentIntentStatus {
    fn from(value: &str) -> Self {
        match value {
            "succeeded" => Self::Succeeded,
            "processing" => Self::Processing,
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_action" => Self::RequiresAction,
            "requires_capture" => Self::RequiresCapture,
            "canceled" => Self::Canceled,
            other => Self::Other(other.to_string()),
        }
    }
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a payment intent for the given amount.
    async fn create_intent(&self, intent: CreateIntent) -> Result<PaymentIntent, PaymentsError>;

    /// Look up the current status of a previously created intent.
    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntentStatus, PaymentsError>;
}

/// Convert a major-unit amount into minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns [`PaymentsError::InvalidAmount`] for negative amounts or amounts that
/// do not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Result<i64, PaymentsError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PaymentsError::InvalidAmount(amount));
    }

    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PaymentsError::InvalidAmount(amount))
}
