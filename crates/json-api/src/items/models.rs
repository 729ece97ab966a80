//! Item Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shareit_app::domain::{
    bookings::records::BookingSummary,
    items::records::{CommentRecord, ItemDetails, ItemRecord},
    requests::records::RequestId,
};

/// An item as listed by its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemResponse {
    /// The unique identifier of the item
    pub id: i64,

    /// The owning user
    pub owner_id: i64,

    /// The request this item was listed in answer to
    pub request_id: Option<i64>,

    pub name: String,

    pub description: String,

    /// Whether the item can currently be booked
    pub available: bool,

    pub created_at: String,

    pub updated_at: String,
}

impl From<ItemRecord> for ItemResponse {
    fn from(item: ItemRecord) -> Self {
        ItemResponse {
            id: item.id.into_i64(),
            owner_id: item.owner_id.into_i64(),
            request_id: item.request_id.map(RequestId::into_i64),
            name: item.name,
            description: item.description,
            available: item.available,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingSummaryResponse {
    pub id: i64,
    pub booker_id: i64,
    pub start: String,
    pub end: String,
}

impl From<BookingSummary> for BookingSummaryResponse {
    fn from(booking: BookingSummary) -> Self {
        BookingSummaryResponse {
            id: booking.id.into_i64(),
            booker_id: booking.booker_id.into_i64(),
            start: booking.start.to_string(),
            end: booking.end.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommentResponse {
    pub id: i64,
    pub item_id: i64,
    pub author_name: String,
    pub text: String,
    pub created_at: String,
}

impl From<CommentRecord> for CommentResponse {
    fn from(comment: CommentRecord) -> Self {
        CommentResponse {
            id: comment.id.into_i64(),
            item_id: comment.item_id.into_i64(),
            author_name: comment.author_name,
            text: comment.text,
            created_at: comment.created_at.to_string(),
        }
    }
}

/// An item with its comments and, for its owner, the approved bookings
/// either side of the listing instant.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemDetailsResponse {
    pub id: i64,
    pub owner_id: i64,
    pub request_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub available: bool,

    /// Most recent approved booking that started before the listing instant
    pub last_booking: Option<BookingSummaryResponse>,

    /// Nearest approved booking starting after the listing instant
    pub next_booking: Option<BookingSummaryResponse>,

    /// Comments, oldest first
    pub comments: Vec<CommentResponse>,
}

impl From<ItemDetails> for ItemDetailsResponse {
    fn from(details: ItemDetails) -> Self {
        let ItemDetails {
            item,
            last_booking,
            next_booking,
            comments,
        } = details;

        ItemDetailsResponse {
            id: item.id.into_i64(),
            owner_id: item.owner_id.into_i64(),
            request_id: item.request_id.map(RequestId::into_i64),
            name: item.name,
            description: item.description,
            available: item.available,
            last_booking: last_booking.map(Into::into),
            next_booking: next_booking.map(Into::into),
            comments: comments.into_iter().map(Into::into).collect(),
        }
    }
}
