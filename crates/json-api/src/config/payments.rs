//! Payments Config

use clap::Args;
use rentreturn_app::payments::{DEFAULT_STRIPE_API_BASE, StripeConfig};

/// Stripe settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Stripe secret key
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: String,

    /// Stripe API origin
    #[arg(long, env = "STRIPE_API_BASE", default_value = DEFAULT_STRIPE_API_BASE)]
    pub stripe_api_base: String,

    /// Currency rentals are charged in
    #[arg(long = "currency", env = "STRIPE_CURRENCY", default_value = "usd")]
    pub currency: String,
}

impl PaymentsConfig {
    #[must_use]
    pub fn stripe(&self) -> StripeConfig {
        StripeConfig {
            api_base: self.stripe_api_base.clone(),
            secret_key: self.stripe_secret_key.clone(),
        }
    }
}
