//! Request Errors

use salvo::http::StatusError;
use tracing::error;

use shareit_app::domain::requests::RequestsServiceError;

use crate::observability;

pub(crate) fn into_status_error(error: RequestsServiceError) -> StatusError {
    let status = match error {
        RequestsServiceError::NotFound => StatusError::not_found().brief("Request not found"),
        RequestsServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        RequestsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Request already exists")
        }
        RequestsServiceError::InvalidReference
        | RequestsServiceError::MissingRequiredData
        | RequestsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid request payload")
        }
        RequestsServiceError::Sql(source) => {
            error!("requests storage failure: {source}");

            StatusError::internal_server_error()
        }
    };

    observability::record_service_error("requests", &status);

    status
}
