//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Errors returned by [`super::UsersService`].
#[derive(Debug, Error)]
pub enum UsersServiceError {
    /// The email is already registered.
    #[error("email already in use")]
    AlreadyExists,

    /// No user has the given id.
    #[error("user not found")]
    NotFound,

    /// The update sets no field.
    #[error("update changes nothing")]
    EmptyUpdate,

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

impl From<Error> for UsersServiceError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = UsersServiceError::from(Error::RowNotFound);

        assert!(matches!(error, UsersServiceError::NotFound));
    }

    #[test]
    fn pool_errors_map_to_sql() {
        let error = UsersServiceError::from(Error::PoolTimedOut);

        assert!(matches!(error, UsersServiceError::Sql(_)));
    }
}
