//! Item Handlers

pub(crate) mod comment;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod search;
pub(crate) mod update;
