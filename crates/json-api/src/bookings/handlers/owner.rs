//! Owner Bookings Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use shareit_app::domain::bookings::data::BookingRole;

use crate::bookings::models::BookingsResponse;

use super::index::list;

/// Owner Bookings Handler
///
/// Returns bookings of items the acting user owns in `state` (default ALL)
/// relative to `at` (default: now), latest start first.
#[endpoint(
    tags("bookings"),
    summary = "List Owner's Bookings",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(
    state: QueryParam<String, false>,
    from: QueryParam<i64, false>,
    size: QueryParam<i64, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<BookingsResponse>, StatusError> {
    list(BookingRole::Owner, state, from, size, at, depot).await
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use shareit_app::domain::bookings::{MockBookingsService, state::BookingState};

    use crate::test_helpers::{TEST_ACTOR, bookings_service};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(bookings, Router::with_path("bookings/owner").get(handler))
    }

    #[tokio::test]
    async fn test_owner_listing_uses_owner_role() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .withf(|actor, role, state, _| {
                *actor == TEST_ACTOR && *role == BookingRole::Owner && *state == BookingState::Past
            })
            .return_once(|_, _, _, _| Ok(Vec::new()));

        bookings.expect_create_booking().never();
        bookings.expect_decide_booking().never();
        bookings.expect_get_booking().never();

        let res = TestClient::get("http://example.com/bookings/owner?state=PAST")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
