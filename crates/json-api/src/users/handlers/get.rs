//! Get User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shareit_app::domain::users::records::{UserId, UserRecord};

use crate::{extensions::*, state::State, users::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub id: i64,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// The date and time the user was created
    pub created_at: String,

    /// The date and time the user was last updated
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.id.into_i64(),
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Get User Handler
///
/// Returns a user.
#[endpoint(tags("users"), summary = "Get User")]
pub(crate) async fn handler(
    user: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(UserId::from_i64(user.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
