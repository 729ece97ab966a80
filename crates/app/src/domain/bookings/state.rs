//! Booking state classification.
//!
//! Splits a user's bookings into the logical states clients can ask for,
//! relative to a reference instant.

use std::str::FromStr;

use jiff::Timestamp;
use thiserror::Error;

use crate::domain::bookings::records::{BookingRecord, BookingStatus};

/// Logical booking state requested by a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingState {
    /// Every booking.
    #[default]
    All,
    /// Started and not yet ended.
    Current,
    /// Already ended.
    Past,
    /// Not yet started.
    Future,
    /// Awaiting the owner's decision.
    Waiting,
    /// Declined by the owner.
    Rejected,
}

/// A state token that names no [`BookingState`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown state: {0}")]
pub struct UnknownBookingState(pub String);

impl FromStr for BookingState {
    type Err = UnknownBookingState;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownBookingState(value.to_string())),
        }
    }
}

impl BookingState {
    /// Parses an optional state token; an absent token means [`BookingState::All`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownBookingState`] for any token that is not a known state.
    pub fn from_token(token: Option<&str>) -> Result<Self, UnknownBookingState> {
        token.map_or(Ok(Self::All), str::parse)
    }

    /// Whether `booking` is in this state at `now`.
    ///
    /// The time-based states partition every booking whose end is after its
    /// start: `Current` includes both boundaries, `Past` ended strictly before
    /// `now` and `Future` starts strictly after it.
    #[must_use]
    pub fn admits(self, booking: &BookingRecord, now: Timestamp) -> bool {
        match self {
            Self::All => true,
            Self::Current => booking.start <= now && booking.end >= now,
            Self::Past => booking.end < now,
            Self::Future => booking.start > now,
            Self::Waiting => booking.status == BookingStatus::Waiting,
            Self::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Keeps the bookings in `state` at `now`, latest start first.
///
/// The sort is stable, so bookings sharing a start keep their incoming order.
#[must_use]
pub fn classify(
    bookings: Vec<BookingRecord>,
    state: BookingState,
    now: Timestamp,
) -> Vec<BookingRecord> {
    let mut admitted: Vec<BookingRecord> = bookings
        .into_iter()
        .filter(|booking| state.admits(booking, now))
        .collect();

    admitted.sort_by(|a, b| b.start.cmp(&a.start));

    admitted
}
