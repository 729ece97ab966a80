//! Item Records

use jiff::Timestamp;

use crate::{
    domain::{
        bookings::records::BookingSummary, requests::records::RequestId, users::records::UserId,
    },
    ids::TypedId,
};

/// Identity of a stored item.
pub type ItemId = TypedId<ItemRecord>;
/// Identity of a stored comment.
pub type CommentId = TypedId<CommentRecord>;

/// Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// Store-generated identity.
    pub id: ItemId,
    /// User who listed the item.
    pub owner_id: UserId,
    /// Request the item answers, if any.
    pub request_id: Option<RequestId>,
    /// Short title.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Whether new bookings are accepted.
    pub available: bool,
    /// When the row was inserted.
    pub created_at: Timestamp,
    /// When the row last changed.
    pub updated_at: Timestamp,
}

/// Comment Record
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    /// Store-generated identity.
    pub id: CommentId,
    /// Item commented on.
    pub item_id: ItemId,
    /// User who wrote the comment.
    pub author_id: UserId,
    /// Author's name at read time.
    pub author_name: String,
    /// Comment body.
    pub text: String,
    /// When the row was inserted.
    pub created_at: Timestamp,
}

/// An item with its comments and, when shown to its owner, the approved
/// bookings either side of the listing instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    /// The item itself.
    pub item: ItemRecord,
    /// Latest approved booking that has started.
    pub last_booking: Option<BookingSummary>,
    /// Earliest approved booking yet to start.
    pub next_booking: Option<BookingSummary>,
    /// Comments, oldest first.
    pub comments: Vec<CommentRecord>,
}
