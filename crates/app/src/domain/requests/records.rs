//! Request Records

use jiff::Timestamp;

use crate::{
    domain::{items::records::ItemRecord, users::records::UserId},
    ids::TypedId,
};

/// Identity of a stored request.
pub type RequestId = TypedId<RequestRecord>;

/// A posted ask for an item nobody has listed yet, with the items that were
/// listed in answer to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    /// Store-generated identity.
    pub id: RequestId,
    /// User who posted the request.
    pub requestor_id: UserId,
    /// What the requestor is looking for.
    pub description: String,
    /// Items listed in answer to the request.
    pub items: Vec<ItemRecord>,
    /// When the request was posted.
    pub created_at: Timestamp,
}
