//! Request Handlers

pub(crate) mod all;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
