//! Booking Handlers

pub(crate) mod create;
pub(crate) mod decide;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod owner;
