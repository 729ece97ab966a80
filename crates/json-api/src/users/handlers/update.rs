//! Update User Handler

use std::sync::Arc;

use garde::Validate;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shareit_app::domain::users::{data::UserUpdate, records::UserId};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
    validation,
};

/// Update User Request
///
/// Absent or blank fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct UpdateUserRequest {
    #[serde(default)]
    #[garde(skip)]
    pub name: Option<String>,

    #[serde(default)]
    #[garde(email)]
    pub email: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserUpdate {
    type Error = StatusError;

    fn try_from(mut request: UpdateUserRequest) -> Result<Self, Self::Error> {
        request.email = request.email.filter(|email| !email.trim().is_empty());

        validation::validate(&request)?;

        Ok(UserUpdate {
            name: request.name,
            email: request.email,
        })
    }
}

/// User Update Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.update",
    skip(user, json, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<i64>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = UserId::from_i64(user.into_inner());
    let update = UserUpdate::try_from(json.into_inner())?;

    tracing::Span::current().record("user_id", tracing::field::display(user));

    let updated = state
        .app
        .users
        .update_user(user, update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_id = %user, "updated user");

    Ok(Json(updated.into()))
}
