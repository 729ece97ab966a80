//! Acting user identification.

pub(crate) mod middleware;

/// Header naming the user on whose behalf a request is made.
pub(crate) const ACTOR_HEADER: &str = "x-sharer-user-id";
