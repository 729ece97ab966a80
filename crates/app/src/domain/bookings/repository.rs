//! Bookings Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    domain::{
        bookings::{
            data::NewBooking,
            records::{BookingId, BookingRecord, BookingStatus, BookingSummary},
        },
        items::records::ItemId,
        users::records::UserId,
    },
    ids::raw_ids,
};

const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const GET_BOOKING_SQL: &str = include_str!("sql/get_booking.sql");
const LOCK_BOOKING_SQL: &str = include_str!("sql/lock_booking.sql");
const UPDATE_BOOKING_STATUS_SQL: &str = include_str!("sql/update_booking_status.sql");
const LIST_BOOKER_BOOKINGS_SQL: &str = include_str!("sql/list_booker_bookings.sql");
const LIST_OWNER_BOOKINGS_SQL: &str = include_str!("sql/list_owner_bookings.sql");
const LAST_ITEM_BOOKINGS_SQL: &str = include_str!("sql/last_item_bookings.sql");
const NEXT_ITEM_BOOKINGS_SQL: &str = include_str!("sql/next_item_bookings.sql");
const HAS_COMPLETED_BOOKING_SQL: &str = include_str!("sql/has_completed_booking.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booker: UserId,
        booking: NewBooking,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(CREATE_BOOKING_SQL)
            .bind(booking.item_id.into_i64())
            .bind(booker.into_i64())
            .bind(SqlxTimestamp::from(booking.start))
            .bind(SqlxTimestamp::from(booking.end))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingId,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(GET_BOOKING_SQL)
            .bind(booking.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetches a booking and holds its row lock until `tx` ends.
    pub(crate) async fn lock_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingId,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LOCK_BOOKING_SQL)
            .bind(booking.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_booking_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingId,
        status: BookingStatus,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(UPDATE_BOOKING_STATUS_SQL)
            .bind(booking.into_i64())
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }

    /// Bookings made by `booker`, ordered by start descending then id.
    pub(crate) async fn list_booker_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booker: UserId,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LIST_BOOKER_BOOKINGS_SQL)
            .bind(booker.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Bookings of items owned by `owner`, ordered by start descending then id.
    pub(crate) async fn list_owner_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LIST_OWNER_BOOKINGS_SQL)
            .bind(owner.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Latest approved booking starting before `point_in_time`, at most one per item.
    pub(crate) async fn last_item_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[ItemId],
        point_in_time: Timestamp,
    ) -> Result<Vec<BookingSummary>, sqlx::Error> {
        query_as::<Postgres, BookingSummary>(LAST_ITEM_BOOKINGS_SQL)
            .bind(raw_ids(items.iter().copied()))
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    /// Earliest approved booking starting after `point_in_time`, at most one per item.
    pub(crate) async fn next_item_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[ItemId],
        point_in_time: Timestamp,
    ) -> Result<Vec<BookingSummary>, sqlx::Error> {
        query_as::<Postgres, BookingSummary>(NEXT_ITEM_BOOKINGS_SQL)
            .bind(raw_ids(items.iter().copied()))
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    /// Whether `booker` has an approved booking of `item` that ended before `point_in_time`.
    pub(crate) async fn has_completed_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemId,
        booker: UserId,
        point_in_time: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(HAS_COMPLETED_BOOKING_SQL)
            .bind(item.into_i64())
            .bind(booker.into_i64())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BookingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: BookingId::from_i64(row.try_get("id")?),
            item_id: ItemId::from_i64(row.try_get("item_id")?),
            item_name: row.try_get("item_name")?,
            item_owner_id: UserId::from_i64(row.try_get("item_owner_id")?),
            booker_id: UserId::from_i64(row.try_get("booker_id")?),
            booker_name: row.try_get("booker_name")?,
            start: row.try_get::<SqlxTimestamp, _>("start_at")?.to_jiff(),
            end: row.try_get::<SqlxTimestamp, _>("end_at")?.to_jiff(),
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BookingSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: BookingId::from_i64(row.try_get("id")?),
            item_id: ItemId::from_i64(row.try_get("item_id")?),
            booker_id: UserId::from_i64(row.try_get("booker_id")?),
            start: row.try_get::<SqlxTimestamp, _>("start_at")?.to_jiff(),
            end: row.try_get::<SqlxTimestamp, _>("end_at")?.to_jiff(),
        })
    }
}
