//! Items service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Errors returned by [`super::ItemsService`].
#[derive(Debug, Error)]
pub enum ItemsServiceError {
    /// No item has the given id.
    #[error("item not found")]
    NotFound,

    /// The acting user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// The referenced request does not exist.
    #[error("request not found")]
    RequestNotFound,

    /// Only the owner may change the item.
    #[error("only the owner may change an item")]
    Forbidden,

    /// The author has no finished approved booking of the item.
    #[error("only users who have finished an approved booking of the item may comment")]
    NoCompletedBooking,

    /// A unique key is already taken.
    #[error("item already exists")]
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

impl From<Error> for ItemsServiceError {
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
