//! Payment gateway errors.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("payment provider rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("payment intent {0} has no client secret")]
    MissingClientSecret(String),

    #[error("amount {0} cannot be charged")]
    InvalidAmount(Decimal),
}
