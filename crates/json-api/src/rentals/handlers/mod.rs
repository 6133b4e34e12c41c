//! Rental Handlers

pub(crate) mod approve;
pub(crate) mod confirm;
pub(crate) mod create;
pub(crate) mod disputes;
pub(crate) mod handover;
pub(crate) mod mine;
pub(crate) mod reject;
pub(crate) mod return_request;
pub(crate) mod vendor;
