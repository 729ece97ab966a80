//! Booking Data

use jiff::Timestamp;

use crate::domain::{bookings::records::BookingStatus, items::records::ItemId};

/// New Booking Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    /// Item to book.
    pub item_id: ItemId,
    /// First instant of the booking.
    pub start: Timestamp,
    /// Last instant of the booking; after `start`.
    pub end: Timestamp,
}

/// Owner's verdict on a waiting booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDecision {
    /// Move the booking to approved.
    Approve,
    /// Move the booking to rejected.
    Reject,
}

impl BookingDecision {
    /// Status the booking moves to.
    #[must_use]
    pub const fn status(self) -> BookingStatus {
        match self {
            Self::Approve => BookingStatus::Approved,
            Self::Reject => BookingStatus::Rejected,
        }
    }
}

impl From<bool> for BookingDecision {
    fn from(approved: bool) -> Self {
        if approved { Self::Approve } else { Self::Reject }
    }
}

/// Which side of a booking the listing user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRole {
    /// Bookings the user made.
    Booker,

    /// Bookings of items the user owns.
    Owner,
}
