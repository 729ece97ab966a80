//! Update Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shareit_app::domain::items::{data::ItemUpdate, records::ItemId};

use crate::{
    extensions::*,
    items::{errors::into_status_error, models::ItemResponse},
    state::State,
};

/// Update Item Request
///
/// Absent or blank fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub available: Option<bool>,
}

impl From<UpdateItemRequest> for ItemUpdate {
    fn from(request: UpdateItemRequest) -> Self {
        ItemUpdate {
            name: request.name,
            description: request.description,
            available: request.available,
        }
    }
}

/// Item Update Handler
#[endpoint(
    tags("items"),
    summary = "Update Item",
    security(("sharer_user_id" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "items.update",
    skip(item, json, depot),
    fields(
        actor_id = tracing::field::Empty,
        item_id = tracing::field::Empty,
        available = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<ItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let item = ItemId::from_i64(item.into_inner());
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("actor_id", tracing::field::display(actor));
    span.record("item_id", tracing::field::display(item));

    if let Some(available) = request.available {
        span.record("available", available);
    }

    let updated = state
        .app
        .items
        .update_item(item, actor, request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(item_id = %item, available = updated.available, "updated item");

    Ok(Json(updated.into()))
}
