//! Get Request Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use shareit_app::domain::requests::records::RequestId;

use crate::{
    extensions::*,
    requests::{errors::into_status_error, models::RequestResponse},
    state::State,
};

/// Get Request Handler
///
/// Returns a request with the items listed in answer to it.
#[endpoint(
    tags("requests"),
    summary = "Get Request",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(
    request: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<RequestResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let request = state
        .app
        .requests
        .get_request(RequestId::from_i64(request.into_inner()), actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(request.into()))
}
