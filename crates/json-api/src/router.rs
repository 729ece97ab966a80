//! App Router

use salvo::Router;

use crate::{actor, bookings, items, requests, users};

/// Every API route. Only `/users` may be called without an acting user.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .post(users::create::handler)
                .push(
                    Router::with_path("{user}")
                        .get(users::get::handler)
                        .patch(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
        .push(
            Router::new()
                .hoop(actor::middleware::handler)
                .push(items_router())
                .push(bookings_router())
                .push(requests_router()),
        )
}

fn items_router() -> Router {
    Router::with_path("items")
        .get(items::index::handler)
        .post(items::create::handler)
        .push(Router::with_path("search").get(items::search::handler))
        .push(
            Router::with_path("{item}")
                .get(items::get::handler)
                .patch(items::update::handler)
                .push(Router::with_path("comment").post(items::comment::handler)),
        )
}

fn bookings_router() -> Router {
    Router::with_path("bookings")
        .get(bookings::index::handler)
        .post(bookings::create::handler)
        .push(Router::with_path("owner").get(bookings::owner::handler))
        .push(
            Router::with_path("{booking}")
                .get(bookings::get::handler)
                .patch(bookings::decide::handler),
        )
}

fn requests_router() -> Router {
    Router::with_path("requests")
        .get(requests::index::handler)
        .post(requests::create::handler)
        .push(Router::with_path("all").get(requests::all::handler))
        .push(Router::with_path("{request}").get(requests::get::handler))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::{affix_state::inject, prelude::*, test::TestClient};
    use testresult::TestResult;

    use shareit_app::{
        context::AppContext,
        domain::{bookings::MockBookingsService, items::MockItemsService},
    };

    use crate::{
        actor::ACTOR_HEADER,
        state::State,
        test_helpers::{
            strict_bookings_mock, strict_items_mock, strict_requests_mock, strict_users_mock,
        },
    };

    use super::*;

    fn make_service(items: MockItemsService, bookings: MockBookingsService) -> Service {
        let app = AppContext {
            users: Arc::new(strict_users_mock()),
            items: Arc::new(items),
            bookings: Arc::new(bookings),
            requests: Arc::new(strict_requests_mock()),
        };

        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(app)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_items_require_an_actor() -> TestResult {
        let res = TestClient::get("http://example.com/items")
            .send(&make_service(strict_items_mock(), strict_bookings_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_search_is_not_taken_for_an_item_id() -> TestResult {
        let mut items = MockItemsService::new();

        items
            .expect_search_items()
            .once()
            .withf(|_, text| text == "drill")
            .return_once(|_, _| Ok(Vec::new()));

        items.expect_get_item().never();

        let res = TestClient::get("http://example.com/items/search?text=drill")
            .add_header(ACTOR_HEADER, "1", true)
            .send(&make_service(items, strict_bookings_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_owner_is_not_taken_for_a_booking_id() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .return_once(|_, _, _, _| Ok(Vec::new()));

        bookings.expect_get_booking().never();

        let res = TestClient::get("http://example.com/bookings/owner")
            .add_header(ACTOR_HEADER, "1", true)
            .send(&make_service(strict_items_mock(), bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
