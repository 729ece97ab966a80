//! Booking Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use shareit_app::domain::bookings::{data::BookingRole, state::BookingState};

use crate::{
    bookings::{errors::into_status_error, models::BookingsResponse},
    extensions::*,
    observability,
    state::State,
    validation::Page,
};

/// Booking Index Handler
///
/// Returns the acting user's own bookings in `state` (default ALL) relative
/// to `at` (default: now), latest start first.
#[endpoint(
    tags("bookings"),
    summary = "List Booker's Bookings",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(
    state: QueryParam<String, false>,
    from: QueryParam<i64, false>,
    size: QueryParam<i64, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<BookingsResponse>, StatusError> {
    list(BookingRole::Booker, state, from, size, at, depot).await
}

/// Lists bookings of the acting user in the given role.
pub(super) async fn list(
    role: BookingRole,
    state: QueryParam<String, false>,
    from: QueryParam<i64, false>,
    size: QueryParam<i64, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<BookingsResponse>, StatusError> {
    let app_state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let point_in_time = at.into_point_in_time()?;
    let page = Page::new(from.into_inner(), size.into_inner())?;

    let booking_state = BookingState::from_token(state.into_inner().as_deref())
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    observability::record_booking_listing(role, booking_state);

    let bookings = app_state
        .app
        .bookings
        .list_bookings(actor, role, booking_state, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BookingsResponse {
        bookings: page.apply(bookings).into_iter().map(Into::into).collect(),
    }))
}
