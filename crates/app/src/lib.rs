//! Rental marketplace domain services, persistence, and third-party adapters.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod payments;
pub mod storage;
pub mod uuids;

#[cfg(test)]
mod test;
