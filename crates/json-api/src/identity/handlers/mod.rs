//! Identity Handlers

pub(crate) mod kyc_status;
pub(crate) mod submit_kyc;
pub(crate) mod submit_verification;
pub(crate) mod verification_status;
