//! Create Item Handler

use std::sync::Arc;

use garde::Validate;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shareit_app::domain::{items::data::NewItem, requests::records::RequestId};

use crate::{
    extensions::*,
    items::{errors::into_status_error, models::ItemResponse},
    state::State,
    validation,
};

/// Create Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct CreateItemRequest {
    #[garde(custom(validation::not_blank))]
    pub name: String,

    #[garde(custom(validation::not_blank))]
    pub description: String,

    /// Whether the item can be booked; must be given
    #[garde(skip)]
    pub available: Option<bool>,

    /// The request this item answers, if any
    #[serde(default)]
    #[garde(skip)]
    pub request_id: Option<i64>,
}

impl TryFrom<CreateItemRequest> for NewItem {
    type Error = StatusError;

    fn try_from(request: CreateItemRequest) -> Result<Self, Self::Error> {
        validation::validate(&request)?;

        let available = request
            .available
            .ok_or_else(|| StatusError::bad_request().brief("available must be given"))?;

        Ok(NewItem {
            name: request.name,
            description: request.description,
            available,
            request_id: request.request_id.map(RequestId::from_i64),
        })
    }
}

/// Create Item Handler
///
/// Lists a new item owned by the acting user.
#[endpoint(
    tags("items"),
    summary = "Create Item",
    security(("sharer_user_id" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item created"),
        (status_code = StatusCode::NOT_FOUND, description = "Owner or request not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "items.create",
    skip(json, depot, res),
    fields(owner_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.actor_or_401()?;
    let item = NewItem::try_from(json.into_inner())?;

    tracing::Span::current().record("owner_id", tracing::field::display(owner));

    let item = state
        .app
        .items
        .create_item(owner, item)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/items/{}", item.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(item_id = %item.id, "created item");

    Ok(Json(item.into()))
}
