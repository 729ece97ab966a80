//! User Errors

use salvo::http::StatusError;
use tracing::error;

use shareit_app::domain::users::UsersServiceError;

use crate::observability;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    let status = match error {
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("Email already in use"),
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::EmptyUpdate => {
            StatusError::bad_request().brief("Update must change name or email")
        }
        UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Sql(source) => {
            error!("users storage failure: {source}");

            StatusError::internal_server_error()
        }
    };

    observability::record_service_error("users", &status);

    status
}
