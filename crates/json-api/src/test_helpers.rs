//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use shareit_app::{
    context::AppContext,
    domain::{
        bookings::{
            MockBookingsService,
            records::{BookingId, BookingRecord, BookingStatus},
        },
        items::{
            MockItemsService,
            records::{ItemId, ItemRecord},
        },
        requests::{
            MockRequestsService,
            records::{RequestId, RequestRecord},
        },
        users::{
            MockUsersService,
            records::{UserId, UserRecord},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ACTOR: UserId = UserId::from_i64(7);
pub(crate) const OTHER_USER: UserId = UserId::from_i64(8);

#[salvo::handler]
pub(crate) async fn inject_actor(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(TEST_ACTOR);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();
    users.expect_list_users().never();
    users.expect_update_user().never();
    users.expect_delete_user().never();

    users
}

pub(crate) fn strict_items_mock() -> MockItemsService {
    let mut items = MockItemsService::new();

    items.expect_create_item().never();
    items.expect_update_item().never();
    items.expect_get_item().never();
    items.expect_list_owner_items().never();
    items.expect_search_items().never();
    items.expect_add_comment().never();

    items
}

pub(crate) fn strict_bookings_mock() -> MockBookingsService {
    let mut bookings = MockBookingsService::new();

    bookings.expect_create_booking().never();
    bookings.expect_decide_booking().never();
    bookings.expect_get_booking().never();
    bookings.expect_list_bookings().never();

    bookings
}

pub(crate) fn strict_requests_mock() -> MockRequestsService {
    let mut requests = MockRequestsService::new();

    requests.expect_create_request().never();
    requests.expect_list_own_requests().never();
    requests.expect_list_other_requests().never();
    requests.expect_get_request().never();

    requests
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(inject_actor)
            .push(route),
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    service(
        AppContext {
            users: Arc::new(users),
            items: Arc::new(strict_items_mock()),
            bookings: Arc::new(strict_bookings_mock()),
            requests: Arc::new(strict_requests_mock()),
        },
        route,
    )
}

pub(crate) fn items_service(items: MockItemsService, route: Router) -> Service {
    service(
        AppContext {
            users: Arc::new(strict_users_mock()),
            items: Arc::new(items),
            bookings: Arc::new(strict_bookings_mock()),
            requests: Arc::new(strict_requests_mock()),
        },
        route,
    )
}

pub(crate) fn bookings_service(bookings: MockBookingsService, route: Router) -> Service {
    service(
        AppContext {
            users: Arc::new(strict_users_mock()),
            items: Arc::new(strict_items_mock()),
            bookings: Arc::new(bookings),
            requests: Arc::new(strict_requests_mock()),
        },
        route,
    )
}

pub(crate) fn requests_service(requests: MockRequestsService, route: Router) -> Service {
    service(
        AppContext {
            users: Arc::new(strict_users_mock()),
            items: Arc::new(strict_items_mock()),
            bookings: Arc::new(strict_bookings_mock()),
            requests: Arc::new(requests),
        },
        route,
    )
}

pub(crate) fn make_user(id: UserId, name: &str) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        email: format!("{name}@example.com"),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_item(id: ItemId, owner: UserId) -> ItemRecord {
    ItemRecord {
        id,
        owner_id: owner,
        request_id: None,
        name: "Drill".to_string(),
        description: "Cordless drill".to_string(),
        available: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_booking(id: BookingId, booker: UserId, status: BookingStatus) -> BookingRecord {
    BookingRecord {
        id,
        item_id: ItemId::from_i64(1),
        item_name: "Drill".to_string(),
        item_owner_id: OTHER_USER,
        booker_id: booker,
        booker_name: "booker".to_string(),
        start: Timestamp::from_second(1_000).unwrap_or(Timestamp::UNIX_EPOCH),
        end: Timestamp::from_second(2_000).unwrap_or(Timestamp::UNIX_EPOCH),
        status,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_request(id: RequestId, requestor: UserId) -> RequestRecord {
    RequestRecord {
        id,
        requestor_id: requestor,
        description: "Need a ladder".to_string(),
        items: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}
