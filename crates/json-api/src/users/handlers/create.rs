//! Create User Handler

use std::sync::Arc;

use garde::Validate;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shareit_app::domain::users::data::NewUser;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
    validation,
};

/// Create User Request
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct CreateUserRequest {
    #[garde(custom(validation::not_blank))]
    pub name: String,

    #[garde(email)]
    pub email: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = StatusError;

    fn try_from(request: CreateUserRequest) -> Result<Self, Self::Error> {
        validation::validate(&request)?;

        Ok(NewUser {
            name: request.name,
            email: request.email,
        })
    }
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "users.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = NewUser::try_from(json.into_inner())?;

    let user = state
        .app
        .users
        .create_user(user)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/users/{}", user.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(user_id = %user.id, "created user");

    Ok(Json(user.into()))
}
