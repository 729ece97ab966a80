//! Search Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    items::{errors::into_status_error, models::ItemResponse},
    state::State,
    validation::Page,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchItemsResponse {
    /// Available items whose name or description contains the text
    pub items: Vec<ItemResponse>,
}

/// Search Items Handler
///
/// Case-insensitive substring search over available items. Blank text finds
/// nothing.
#[endpoint(
    tags("items"),
    summary = "Search Items",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(
    text: QueryParam<String, false>,
    from: QueryParam<i64, false>,
    size: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<SearchItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let page = Page::new(from.into_inner(), size.into_inner())?;

    let items = state
        .app
        .items
        .search_items(actor, text.into_inner().unwrap_or_default())
        .await
        .map_err(into_status_error)?;

    Ok(Json(SearchItemsResponse {
        items: page.apply(items).into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shareit_app::domain::items::{MockItemsService, records::ItemId};

    use crate::test_helpers::{OTHER_USER, TEST_ACTOR, items_service, make_item};

    use super::*;

    fn make_service(items: MockItemsService) -> Service {
        items_service(items, Router::with_path("items/search").get(handler))
    }

    #[tokio::test]
    async fn test_search_forwards_text() -> TestResult {
        let item = make_item(ItemId::from_i64(4), OTHER_USER);

        let mut items = MockItemsService::new();

        items
            .expect_search_items()
            .once()
            .withf(|actor, text| *actor == TEST_ACTOR && text == "dRiLl")
            .return_once(move |_, _| Ok(vec![item]));

        items.expect_create_item().never();
        items.expect_update_item().never();
        items.expect_get_item().never();
        items.expect_list_owner_items().never();
        items.expect_add_comment().never();

        let mut res = TestClient::get("http://example.com/items/search?text=dRiLl")
            .send(&make_service(items))
            .await;

        let body: SearchItemsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_search_without_text_sends_empty_text() -> TestResult {
        let mut items = MockItemsService::new();

        items
            .expect_search_items()
            .once()
            .withf(|_, text| text.is_empty())
            .return_once(|_, _| Ok(Vec::new()));

        items.expect_create_item().never();
        items.expect_update_item().never();
        items.expect_get_item().never();
        items.expect_list_owner_items().never();
        items.expect_add_comment().never();

        let mut res = TestClient::get("http://example.com/items/search")
            .send(&make_service(items))
            .await;

        let body: SearchItemsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.items.is_empty());

        Ok(())
    }
}
