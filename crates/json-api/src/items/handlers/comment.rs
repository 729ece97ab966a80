//! Add Comment Handler

use std::sync::Arc;

use garde::Validate;
use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shareit_app::domain::items::{data::NewComment, records::ItemId};

use crate::{
    extensions::*,
    items::{errors::into_status_error, models::CommentResponse},
    state::State,
    validation,
};

/// Add Comment Request
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct CreateCommentRequest {
    #[garde(custom(validation::not_blank))]
    pub text: String,
}

impl TryFrom<CreateCommentRequest> for NewComment {
    type Error = StatusError;

    fn try_from(request: CreateCommentRequest) -> Result<Self, Self::Error> {
        validation::validate(&request)?;

        Ok(NewComment { text: request.text })
    }
}

/// Add Comment Handler
///
/// Only users whose approved booking of the item has already ended may
/// comment on it. The cutoff is always the server's clock.
#[endpoint(
    tags("items"),
    summary = "Add Comment",
    security(("sharer_user_id" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Comment added"),
        (status_code = StatusCode::NOT_FOUND, description = "Item or author not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "items.comment",
    skip(item, json, depot, res),
    fields(author_id = tracing::field::Empty, item_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    json: JsonBody<CreateCommentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CommentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let author = depot.actor_or_401()?;
    let item = ItemId::from_i64(item.into_inner());
    let comment = NewComment::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("author_id", tracing::field::display(author));
    span.record("item_id", tracing::field::display(item));

    let comment = state
        .app
        .items
        .add_comment(item, author, comment, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    tracing::info!(comment_id = %comment.id, "added comment");

    Ok(Json(comment.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shareit_app::domain::items::{
        ItemsServiceError, MockItemsService,
        records::{CommentId, CommentRecord},
    };

    use crate::test_helpers::{TEST_ACTOR, items_service};

    use super::*;

    fn make_service(items: MockItemsService) -> Service {
        items_service(items, Router::with_path("items/{item}/comment").post(handler))
    }

    #[tokio::test]
    async fn test_add_comment_success() -> TestResult {
        let comment = CommentRecord {
            id: CommentId::from_i64(1),
            item_id: ItemId::from_i64(10),
            author_id: TEST_ACTOR,
            author_name: "booker".to_string(),
            text: "Worked great".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
        };

        let mut items = MockItemsService::new();

        items
            .expect_add_comment()
            .once()
            .withf(|item, author, new, _| {
                *item == ItemId::from_i64(10)
                    && *author == TEST_ACTOR
                    && new.text == "Worked great"
            })
            .return_once(move |_, _, _, _| Ok(comment));

        items.expect_create_item().never();
        items.expect_update_item().never();
        items.expect_get_item().never();
        items.expect_list_owner_items().never();
        items.expect_search_items().never();

        let mut res = TestClient::post("http://example.com/items/10/comment")
            .json(&json!({ "text": "Worked great" }))
            .send(&make_service(items))
            .await;

        let body: CommentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.author_name, "booker");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_comment_ignores_client_supplied_instant() -> TestResult {
        let before = Timestamp::now();
        let far_future: Timestamp = "2100-01-01T00:00:00Z".parse()?;

        let mut items = MockItemsService::new();

        items
            .expect_add_comment()
            .once()
            .withf(move |_, _, _, now| *now >= before && *now < far_future)
            .return_once(|_, _, _, _| Err(ItemsServiceError::NoCompletedBooking));

        items.expect_create_item().never();
        items.expect_update_item().never();
        items.expect_get_item().never();
        items.expect_list_owner_items().never();
        items.expect_search_items().never();

        let res = TestClient::post("http://example.com/items/10/comment?at=2100-01-01T00:00:00Z")
            .json(&json!({ "text": "Can't wait" }))
            .send(&make_service(items))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_comment_without_completed_booking_returns_400() -> TestResult {
        let mut items = MockItemsService::new();

        items
            .expect_add_comment()
            .once()
            .return_once(|_, _, _, _| Err(ItemsServiceError::NoCompletedBooking));

        items.expect_create_item().never();
        items.expect_update_item().never();
        items.expect_get_item().never();
        items.expect_list_owner_items().never();
        items.expect_search_items().never();

        let res = TestClient::post("http://example.com/items/10/comment")
            .json(&json!({ "text": "Never used it" }))
            .send(&make_service(items))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_comment_returns_400() -> TestResult {
        let mut items = MockItemsService::new();

        items.expect_add_comment().never();

        let res = TestClient::post("http://example.com/items/10/comment")
            .json(&json!({ "text": "  " }))
            .send(&make_service(items))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
