//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use shareit_app::domain::users::records::UserId;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Delete User Handler
///
/// Removes the user together with their items, bookings, requests and comments.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "users.delete", skip(user, depot), err)]
pub(crate) async fn handler(
    user: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = UserId::from_i64(user.into_inner());

    state
        .app
        .users
        .delete_user(user)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_id = %user, "deleted user");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use shareit_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::users_service;

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("users/{user}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_user_success() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_delete_user()
            .once()
            .withf(|u| *u == UserId::from_i64(6))
            .return_once(|_| Ok(()));

        users.expect_create_user().never();
        users.expect_get_user().never();
        users.expect_list_users().never();
        users.expect_update_user().never();

        let res = TestClient::delete("http://example.com/users/6")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_delete_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        users.expect_create_user().never();
        users.expect_get_user().never();
        users.expect_list_users().never();
        users.expect_update_user().never();

        let res = TestClient::delete("http://example.com/users/6")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
