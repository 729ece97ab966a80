//! Item Errors

use salvo::http::StatusError;
use tracing::error;

use shareit_app::domain::items::ItemsServiceError;

use crate::observability;

pub(crate) fn into_status_error(error: ItemsServiceError) -> StatusError {
    let status = match error {
        ItemsServiceError::NotFound => StatusError::not_found().brief("Item not found"),
        ItemsServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        ItemsServiceError::RequestNotFound => StatusError::not_found().brief("Request not found"),
        ItemsServiceError::Forbidden => {
            StatusError::forbidden().brief("Only the owner may change an item")
        }
        ItemsServiceError::NoCompletedBooking => StatusError::bad_request()
            .brief("Only users who have finished an approved booking of the item may comment"),
        ItemsServiceError::AlreadyExists => StatusError::conflict().brief("Item already exists"),
        ItemsServiceError::InvalidReference
        | ItemsServiceError::MissingRequiredData
        | ItemsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid item payload")
        }
        ItemsServiceError::Sql(source) => {
            error!("items storage failure: {source}");

            StatusError::internal_server_error()
        }
    };

    observability::record_service_error("items", &status);

    status
}
