//! Bookings service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Errors returned by [`super::BookingsService`].
#[derive(Debug, Error)]
pub enum BookingsServiceError {
    /// No booking has the given id.
    #[error("booking not found")]
    NotFound,

    /// The acting user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// The booked item does not exist.
    #[error("item not found")]
    ItemNotFound,

    /// The item is not available.
    #[error("item is not available for booking")]
    ItemUnavailable,

    /// The end is not after the start.
    #[error("booking must end after it starts")]
    InvalidPeriod,

    /// The booker owns the item.
    #[error("owner cannot book their own item")]
    OwnItem,

    /// The actor is neither booker nor owner, or not the owner when deciding.
    #[error("access to booking denied")]
    Forbidden,

    /// The booking is no longer waiting.
    #[error("booking already approved or rejected")]
    AlreadyDecided,

    /// A unique key is already taken.
    #[error("booking already exists")]
    AlreadyExists,

    /// A referenced row does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// A required column was null.
    #[error("missing required data")]
    MissingRequiredData,

    /// A value broke a table constraint.
    #[error("invalid data")]
    InvalidData,

    /// Any other storage failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
