//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        bookings::{BookingsService, PgBookingsService},
        items::{ItemsService, PgItemsService},
        requests::{PgRequestsService, RequestsService},
        users::{PgUsersService, UsersService},
    },
};

/// Failure while building an [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database could not be reached.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    /// Pending migrations could not be applied.
    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Services the API layer calls into.
#[derive(Clone)]
pub struct AppContext {
    /// User accounts.
    pub users: Arc<dyn UsersService>,
    /// Items and their comments.
    pub items: Arc<dyn ItemsService>,
    /// Bookings and their decisions.
    pub bookings: Arc<dyn BookingsService>,
    /// Item requests.
    pub requests: Arc<dyn RequestsService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending
    /// migrations first when `run_migrations` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(url: &str, run_migrations: bool) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_db(&Db::new(pool)))
    }

    /// Build application context backed by the given database handle.
    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            items: Arc::new(PgItemsService::new(db.clone())),
            bookings: Arc::new(PgBookingsService::new(db.clone())),
            requests: Arc::new(PgRequestsService::new(db.clone())),
        }
    }
}
