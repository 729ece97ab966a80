//! Bookings service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        bookings::{
            data::{BookingDecision, BookingRole, NewBooking},
            errors::BookingsServiceError,
            records::{BookingId, BookingRecord, BookingStatus},
            repository::PgBookingsRepository,
            state::{BookingState, classify},
        },
        items::repositories::PgItemsRepository,
        users::{records::UserId, repository::PgUsersRepository},
    },
};

/// [`BookingsService`] backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgBookingsService {
    db: Db,
    bookings_repository: PgBookingsRepository,
    items_repository: PgItemsRepository,
    users_repository: PgUsersRepository,
}

impl PgBookingsService {
    /// Creates the service over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            bookings_repository: PgBookingsRepository::new(),
            items_repository: PgItemsRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }

    async fn ensure_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<(), BookingsServiceError> {
        if self.users_repository.user_exists(tx, user).await? {
            Ok(())
        } else {
            Err(BookingsServiceError::UserNotFound)
        }
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    async fn create_booking(
        &self,
        booker: UserId,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, booker).await?;

        let item = self
            .items_repository
            .find_item(&mut tx, booking.item_id)
            .await?
            .ok_or(BookingsServiceError::ItemNotFound)?;

        if !item.available {
            return Err(BookingsServiceError::ItemUnavailable);
        }

        if booking.start >= booking.end {
            return Err(BookingsServiceError::InvalidPeriod);
        }

        if item.owner_id == booker {
            return Err(BookingsServiceError::OwnItem);
        }

        let created = self
            .bookings_repository
            .create_booking(&mut tx, booker, booking)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn decide_booking(
        &self,
        booking: BookingId,
        actor: UserId,
        decision: BookingDecision,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        // Held until commit; a concurrent decision blocks here and then sees
        // the terminal status.
        let current = self.bookings_repository.lock_booking(&mut tx, booking).await?;

        if current.item_owner_id != actor {
            return Err(BookingsServiceError::Forbidden);
        }

        if current.status != BookingStatus::Waiting {
            return Err(BookingsServiceError::AlreadyDecided);
        }

        let decided = self
            .bookings_repository
            .update_booking_status(&mut tx, booking, decision.status())
            .await?;

        tx.commit().await?;

        debug!(booking = %booking, status = %decided.status, "booking decided");

        Ok(decided)
    }

    async fn get_booking(
        &self,
        booking: BookingId,
        actor: UserId,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let booking = self.bookings_repository.get_booking(&mut tx, booking).await?;

        tx.commit().await?;

        if !booking.involves(actor) {
            return Err(BookingsServiceError::Forbidden);
        }

        Ok(booking)
    }

    async fn list_bookings(
        &self,
        actor: UserId,
        role: BookingRole,
        state: BookingState,
        point_in_time: Timestamp,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, actor).await?;

        let bookings = match role {
            BookingRole::Booker => {
                self.bookings_repository
                    .list_booker_bookings(&mut tx, actor)
                    .await?
            }
            BookingRole::Owner => {
                self.bookings_repository
                    .list_owner_bookings(&mut tx, actor)
                    .await?
            }
        };

        tx.commit().await?;

        Ok(classify(bookings, state, point_in_time))
    }
}

/// Bookings, their approval and their listings.
#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Books an item for `booker`. New bookings wait for the owner's decision.
    async fn create_booking(
        &self,
        booker: UserId,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Approves or rejects a waiting booking on behalf of the item's owner.
    async fn decide_booking(
        &self,
        booking: BookingId,
        actor: UserId,
        decision: BookingDecision,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Retrieves a booking for its booker or the item's owner.
    async fn get_booking(
        &self,
        booking: BookingId,
        actor: UserId,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Lists the actor's bookings in `state` at `point_in_time`, latest start first.
    async fn list_bookings(
        &self,
        actor: UserId,
        role: BookingRole,
        state: BookingState,
        point_in_time: Timestamp,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError>;
}
