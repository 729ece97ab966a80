//! Get Booking Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use shareit_app::domain::bookings::records::BookingId;

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    state::State,
};

/// Get Booking Handler
///
/// Returns a booking to its booker or the booked item's owner.
#[endpoint(
    tags("bookings"),
    summary = "Get Booking",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(
    booking: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let booking = state
        .app
        .bookings
        .get_booking(BookingId::from_i64(booking.into_inner()), actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(booking.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shareit_app::domain::bookings::{
        BookingsServiceError, MockBookingsService, records::BookingStatus,
    };

    use crate::test_helpers::{TEST_ACTOR, bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(bookings, Router::with_path("bookings/{booking}").get(handler))
    }

    #[tokio::test]
    async fn test_get_booking_renders_item_and_booker() -> TestResult {
        let id = BookingId::from_i64(9);
        let booking = make_booking(id, TEST_ACTOR, BookingStatus::Waiting);

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_get_booking()
            .once()
            .withf(move |b, actor| *b == id && *actor == TEST_ACTOR)
            .return_once(move |_, _| Ok(booking));

        bookings.expect_create_booking().never();
        bookings.expect_decide_booking().never();
        bookings.expect_list_bookings().never();

        let mut res = TestClient::get("http://example.com/bookings/9")
            .send(&make_service(bookings))
            .await;

        let body: BookingResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.item.name, "Drill");
        assert_eq!(body.booker.name, "booker");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_booking_by_outsider_returns_403() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_get_booking()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::Forbidden));

        bookings.expect_create_booking().never();
        bookings.expect_decide_booking().never();
        bookings.expect_list_bookings().never();

        let res = TestClient::get("http://example.com/bookings/9")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_booking_returns_404() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_get_booking()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::NotFound));

        bookings.expect_create_booking().never();
        bookings.expect_decide_booking().never();
        bookings.expect_list_bookings().never();

        let res = TestClient::get("http://example.com/bookings/9")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
