//! Rentals

pub(crate) mod errors;
mod handlers;
mod models;
pub(crate) mod requests;

pub(crate) use handlers::*;
