//! Get Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use shareit_app::domain::items::records::ItemId;

use crate::{
    extensions::*,
    items::{errors::into_status_error, models::ItemDetailsResponse},
    state::State,
};

/// Get Item Handler
///
/// Returns an item with its comments. The owner also sees the last and next
/// approved bookings relative to `at` (default: now).
#[endpoint(
    tags("items"),
    summary = "Get Item",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ItemDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let item = state
        .app
        .items
        .get_item(ItemId::from_i64(item.into_inner()), actor, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shareit_app::domain::{
        bookings::records::{BookingId, BookingSummary},
        items::{ItemsServiceError, MockItemsService, records::ItemDetails},
    };

    use crate::test_helpers::{OTHER_USER, TEST_ACTOR, items_service, make_item};

    use super::*;

    fn make_service(items: MockItemsService) -> Service {
        items_service(items, Router::with_path("items/{item}").get(handler))
    }

    #[tokio::test]
    async fn test_get_item_renders_bookings_and_comments() -> TestResult {
        let id = ItemId::from_i64(10);
        let at: Timestamp = "2026-02-21T12:00:00Z".parse()?;

        let details = ItemDetails {
            item: make_item(id, TEST_ACTOR),
            last_booking: Some(BookingSummary {
                id: BookingId::from_i64(1),
                item_id: id,
                booker_id: OTHER_USER,
                start: "2026-02-20T12:00:00Z".parse()?,
                end: "2026-02-20T13:00:00Z".parse()?,
            }),
            next_booking: None,
            comments: Vec::new(),
        };

        let mut items = MockItemsService::new();

        items
            .expect_get_item()
            .once()
            .withf(move |i, actor, point_in_time| {
                *i == id && *actor == TEST_ACTOR && *point_in_time == at
            })
            .return_once(move |_, _, _| Ok(details));

        items.expect_create_item().never();
        items.expect_update_item().never();
        items.expect_list_owner_items().never();
        items.expect_search_items().never();
        items.expect_add_comment().never();

        let mut res = TestClient::get("http://example.com/items/10?at=2026-02-21T12:00:00Z")
            .send(&make_service(items))
            .await;

        let body: ItemDetailsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.last_booking.map(|booking| booking.id), Some(1));
        assert!(body.next_booking.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_item_returns_404() -> TestResult {
        let mut items = MockItemsService::new();

        items
            .expect_get_item()
            .once()
            .return_once(|_, _, _| Err(ItemsServiceError::NotFound));

        items.expect_create_item().never();
        items.expect_update_item().never();
        items.expect_list_owner_items().never();
        items.expect_search_items().never();
        items.expect_add_comment().never();

        let res = TestClient::get("http://example.com/items/10")
            .send(&make_service(items))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_item_bad_point_in_time_returns_400() -> TestResult {
        let mut items = MockItemsService::new();

        items.expect_get_item().never();

        let res = TestClient::get("http://example.com/items/10?at=yesterday")
            .send(&make_service(items))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
