//! Rentals
//!
//! The rental lifecycle: a renter opens a `pending` rental backed by a payment
//! intent, confirms it once the payment settles (flipping the product to
//! `rented`), and requests a return. The owning vendor hands the item over,
//! then approves the return (settling any overdue fine and releasing the
//! product) or rejects it so the renter can resubmit.

pub mod data;
pub mod errors;
pub mod fines;
pub mod lifecycle;
pub mod records;
mod repository;
pub mod service;
pub mod stats;
pub mod views;

pub use errors::RentalsServiceError;
pub use service::*;
