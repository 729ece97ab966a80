//! Create Booking Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shareit_app::domain::{bookings::data::NewBooking, items::records::ItemId};

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    state::State,
};

/// Create Booking Request
///
/// `start` and `end` are RFC 3339 instants or UTC civil date-times.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookingRequest {
    pub item_id: i64,
    pub start: String,
    pub end: String,
}

impl CreateBookingRequest {
    /// Parses the period; bookings may not start before `now`.
    fn into_new_booking(self, now: Timestamp) -> Result<NewBooking, StatusError> {
        let start = parse_timestamp(&self.start).or_400("could not parse booking start")?;
        let end = parse_timestamp(&self.end).or_400("could not parse booking end")?;

        if start < now {
            return Err(StatusError::bad_request().brief("Booking must not start in the past"));
        }

        Ok(NewBooking {
            item_id: ItemId::from_i64(self.item_id),
            start,
            end,
        })
    }
}

/// Create Booking Handler
///
/// Books an item for the acting user. The booking waits for the owner's
/// decision.
#[endpoint(
    tags("bookings"),
    summary = "Create Booking",
    security(("sharer_user_id" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Booking created"),
        (status_code = StatusCode::NOT_FOUND, description = "Booker or item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner cannot book own item"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "bookings.create",
    skip(json, depot, res),
    fields(booker_id = tracing::field::Empty, item_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let booker = depot.actor_or_401()?;
    let booking = json.into_inner().into_new_booking(Timestamp::now())?;

    let span = tracing::Span::current();

    span.record("booker_id", tracing::field::display(booker));
    span.record("item_id", tracing::field::display(booking.item_id));

    let booking = state
        .app
        .bookings
        .create_booking(booker, booking)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/bookings/{}", booking.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(booking_id = %booking.id, "created booking");

    Ok(Json(booking.into()))
}
