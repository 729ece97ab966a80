//! User Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// User Id
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Store-generated identity.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Unique contact email.
    pub email: String,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
