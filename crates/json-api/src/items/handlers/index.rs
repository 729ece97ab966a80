//! Item Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    items::{errors::into_status_error, models::ItemDetailsResponse},
    state::State,
    validation::Page,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemsResponse {
    /// The acting user's items, ordered by id
    pub items: Vec<ItemDetailsResponse>,
}

/// Item Index Handler
///
/// Returns the acting user's items with their last/next bookings and comments.
#[endpoint(
    tags("items"),
    summary = "List Own Items",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    from: QueryParam<i64, false>,
    size: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<ItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.actor_or_401()?;
    let point_in_time = at.into_point_in_time()?;
    let page = Page::new(from.into_inner(), size.into_inner())?;

    let items = state
        .app
        .items
        .list_owner_items(owner, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ItemsResponse {
        items: page.apply(items).into_iter().map(Into::into).collect(),
    }))
}
