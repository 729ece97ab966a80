//! Test Helpers

use jiff::Timestamp;

use crate::{
    domain::{
        bookings::{
            BookingsService, BookingsServiceError,
            data::{BookingDecision, NewBooking},
            records::BookingRecord,
        },
        items::{
            ItemsService, ItemsServiceError,
            data::NewItem,
            records::{ItemId, ItemRecord},
        },
        requests::{
            RequestsService, RequestsServiceError, data::NewRequest, records::RequestRecord,
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserId, UserRecord},
        },
    },
    test::TestContext,
};

/// Creates a user with the email `{name}@example.com`.
pub(crate) async fn create_user(
    ctx: &TestContext,
    name: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
        })
        .await
}

/// Creates an available item.
pub(crate) async fn create_item(
    ctx: &TestContext,
    owner: UserId,
    name: &str,
) -> Result<ItemRecord, ItemsServiceError> {
    ctx.items
        .create_item(
            owner,
            NewItem {
                name: name.to_string(),
                description: format!("{name} for hire"),
                available: true,
                request_id: None,
            },
        )
        .await
}

pub(crate) async fn create_booking(
    ctx: &TestContext,
    booker: UserId,
    item: ItemId,
    start: Timestamp,
    end: Timestamp,
) -> Result<BookingRecord, BookingsServiceError> {
    ctx.bookings
        .create_booking(
            booker,
            NewBooking {
                item_id: item,
                start,
                end,
            },
        )
        .await
}

/// Books `item` and has its owner approve the booking.
pub(crate) async fn approved_booking(
    ctx: &TestContext,
    item: &ItemRecord,
    booker: UserId,
    start: Timestamp,
    end: Timestamp,
) -> Result<BookingRecord, BookingsServiceError> {
    let booking = create_booking(ctx, booker, item.id, start, end).await?;

    ctx.bookings
        .decide_booking(booking.id, item.owner_id, BookingDecision::Approve)
        .await
}

pub(crate) async fn create_request(
    ctx: &TestContext,
    requestor: UserId,
    description: &str,
) -> Result<RequestRecord, RequestsServiceError> {
    ctx.requests
        .create_request(
            requestor,
            NewRequest {
                description: description.to_string(),
            },
        )
        .await
}
