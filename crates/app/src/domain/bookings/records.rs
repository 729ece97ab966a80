//! Booking Records

use std::fmt;

use jiff::Timestamp;

use crate::{
    domain::{items::records::ItemId, users::records::UserId},
    ids::TypedId,
};

/// Identity of a stored booking.
pub type BookingId = TypedId<BookingRecord>;

/// Lifecycle status of a booking, stored as the `booking_status` enum.
///
/// A booking starts out `Waiting` and moves to exactly one of the terminal
/// states when the item's owner decides on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Awaiting the owner's decision.
    Waiting,
    /// Accepted by the owner.
    Approved,
    /// Declined by the owner.
    Rejected,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        })
    }
}

/// Booking Record
///
/// Carries the booked item's name and owner and the booker's name alongside
/// the booking itself.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    /// Store-generated identity.
    pub id: BookingId,
    /// Booked item.
    pub item_id: ItemId,
    /// Booked item's name.
    pub item_name: String,
    /// Owner of the booked item.
    pub item_owner_id: UserId,
    /// User who made the booking.
    pub booker_id: UserId,
    /// Booker's name.
    pub booker_name: String,
    /// First instant of the booking.
    pub start: Timestamp,
    /// Last instant of the booking.
    pub end: Timestamp,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// When the row was inserted.
    pub created_at: Timestamp,
    /// When the status last changed.
    pub updated_at: Timestamp,
}

impl BookingRecord {
    /// Whether `user` booked this or owns the booked item.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.booker_id == user || self.item_owner_id == user
    }
}

/// Short form of a booking attached to item listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSummary {
    /// Store-generated identity.
    pub id: BookingId,
    /// Booked item.
    pub item_id: ItemId,
    /// User who made the booking.
    pub booker_id: UserId,
    /// First instant of the booking.
    pub start: Timestamp,
    /// Last instant of the booking.
    pub end: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_in_upper_case() {
        assert_eq!(BookingStatus::Waiting.to_string(), "WAITING");
        assert_eq!(BookingStatus::Approved.to_string(), "APPROVED");
        assert_eq!(BookingStatus::Rejected.to_string(), "REJECTED");
    }
}
