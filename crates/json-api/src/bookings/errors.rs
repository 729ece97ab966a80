//! Booking Errors

use salvo::http::StatusError;
use tracing::error;

use shareit_app::domain::bookings::BookingsServiceError;

use crate::observability;

pub(crate) fn into_status_error(error: BookingsServiceError) -> StatusError {
    let status = match error {
        BookingsServiceError::NotFound => StatusError::not_found().brief("Booking not found"),
        BookingsServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        BookingsServiceError::ItemNotFound => StatusError::not_found().brief("Item not found"),
        BookingsServiceError::ItemUnavailable => {
            StatusError::bad_request().brief("Item is not available for booking")
        }
        BookingsServiceError::InvalidPeriod => {
            StatusError::bad_request().brief("Booking must end after it starts")
        }
        BookingsServiceError::OwnItem => {
            StatusError::forbidden().brief("Owners cannot book their own items")
        }
        BookingsServiceError::Forbidden => {
            StatusError::forbidden().brief("Access to booking denied")
        }
        BookingsServiceError::AlreadyDecided => {
            StatusError::bad_request().brief("Booking was already approved or rejected")
        }
        BookingsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Booking already exists")
        }
        BookingsServiceError::InvalidReference
        | BookingsServiceError::MissingRequiredData
        | BookingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid booking payload")
        }
        BookingsServiceError::Sql(source) => {
            error!("bookings storage failure: {source}");

            StatusError::internal_server_error()
        }
    };

    observability::record_service_error("bookings", &status);

    status
}
