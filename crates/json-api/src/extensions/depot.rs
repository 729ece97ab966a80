//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use shareit_app::domain::users::records::UserId;

const ACTOR_DEPOT_KEY: &str = "actor";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_actor(&mut self, actor: UserId);

    fn actor_or_401(&self) -> Result<UserId, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_actor(&mut self, actor: UserId) {
        self.insert(ACTOR_DEPOT_KEY, actor);
    }

    fn actor_or_401(&self) -> Result<UserId, StatusError> {
        self.get::<UserId>(ACTOR_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Missing acting user"))
    }
}
