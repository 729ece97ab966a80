//! Decide Booking Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use shareit_app::domain::bookings::{data::BookingDecision, records::BookingId};

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    observability,
    state::State,
};

/// Decide Booking Handler
///
/// Approves (`approved=true`) or rejects a waiting booking. Only the booked
/// item's owner may decide, and only once.
#[endpoint(
    tags("bookings"),
    summary = "Approve or Reject Booking",
    security(("sharer_user_id" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Booking decided"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the item owner"),
        (status_code = StatusCode::BAD_REQUEST, description = "Already decided"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "bookings.decide",
    skip(booking, approved, depot),
    fields(
        actor_id = tracing::field::Empty,
        booking_id = tracing::field::Empty,
        approved = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    booking: PathParam<i64>,
    approved: QueryParam<bool, true>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let booking = BookingId::from_i64(booking.into_inner());
    let approved = approved.into_inner();

    let span = tracing::Span::current();

    span.record("actor_id", tracing::field::display(actor));
    span.record("booking_id", tracing::field::display(booking));
    span.record("approved", approved);

    let decided = state
        .app
        .bookings
        .decide_booking(booking, actor, BookingDecision::from(approved))
        .await
        .map_err(into_status_error)?;

    observability::record_booking_decision(decided.status);

    tracing::info!(booking_id = %booking, status = %decided.status, "decided booking");

    Ok(Json(decided.into()))
}
