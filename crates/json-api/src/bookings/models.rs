//! Booking Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shareit_app::domain::bookings::records::BookingRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookedItemResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookerResponse {
    pub id: i64,
    pub name: String,
}

/// A booking with the booked item and its booker.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingResponse {
    /// The unique identifier of the booking
    pub id: i64,

    pub start: String,

    pub end: String,

    /// WAITING, APPROVED or REJECTED
    pub status: String,

    pub item: BookedItemResponse,

    pub booker: BookerResponse,
}

impl From<BookingRecord> for BookingResponse {
    fn from(booking: BookingRecord) -> Self {
        BookingResponse {
            id: booking.id.into_i64(),
            start: booking.start.to_string(),
            end: booking.end.to_string(),
            status: booking.status.to_string(),
            item: BookedItemResponse {
                id: booking.item_id.into_i64(),
                name: booking.item_name,
            },
            booker: BookerResponse {
                id: booking.booker_id.into_i64(),
                name: booking.booker_name,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingsResponse {
    /// Bookings, latest start first
    pub bookings: Vec<BookingResponse>,
}
