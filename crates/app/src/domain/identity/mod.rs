//! Identity
//!
//! Self-service document submission. Renters upload a KYC document and vendors
//! upload a business document; either submission puts the matching review
//! status back to `pending` for a superadmin to decide.

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::IdentityServiceError;
pub use service::*;
