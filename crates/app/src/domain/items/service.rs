//! Items service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        bookings::{records::BookingSummary, repository::PgBookingsRepository},
        items::{
            data::{ItemUpdate, NewComment, NewItem},
            errors::ItemsServiceError,
            records::{CommentRecord, ItemDetails, ItemId, ItemRecord},
            repositories::{PgCommentsRepository, PgItemsRepository},
        },
        requests::repository::PgRequestsRepository,
        users::{records::UserId, repository::PgUsersRepository},
    },
};

/// [`ItemsService`] backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgItemsService {
    db: Db,
    items_repository: PgItemsRepository,
    comments_repository: PgCommentsRepository,
    bookings_repository: PgBookingsRepository,
    requests_repository: PgRequestsRepository,
    users_repository: PgUsersRepository,
}

impl PgItemsService {
    /// Creates the service over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgItemsRepository::new(),
            comments_repository: PgCommentsRepository::new(),
            bookings_repository: PgBookingsRepository::new(),
            requests_repository: PgRequestsRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }

    async fn ensure_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<(), ItemsServiceError> {
        if self.users_repository.user_exists(tx, user).await? {
            Ok(())
        } else {
            Err(ItemsServiceError::UserNotFound)
        }
    }

    /// Attaches comments to `items`, plus last/next bookings when `with_bookings` is set.
    ///
    /// Each kind of detail is loaded with one query for the whole item set.
    async fn with_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: Vec<ItemRecord>,
        with_bookings: bool,
        point_in_time: Timestamp,
    ) -> Result<Vec<ItemDetails>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();

        let mut comments: FxHashMap<ItemId, Vec<CommentRecord>> = FxHashMap::default();

        for comment in self.comments_repository.list_item_comments(tx, &ids).await? {
            comments.entry(comment.item_id).or_default().push(comment);
        }

        let (mut last, mut next) = if with_bookings {
            let last = self
                .bookings_repository
                .last_item_bookings(tx, &ids, point_in_time)
                .await?;

            let next = self
                .bookings_repository
                .next_item_bookings(tx, &ids, point_in_time)
                .await?;

            (by_item(last), by_item(next))
        } else {
            (FxHashMap::default(), FxHashMap::default())
        };

        Ok(items
            .into_iter()
            .map(|item| ItemDetails {
                last_booking: last.remove(&item.id),
                next_booking: next.remove(&item.id),
                comments: comments.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect())
    }
}

fn by_item(bookings: Vec<BookingSummary>) -> FxHashMap<ItemId, BookingSummary> {
    bookings
        .into_iter()
        .map(|booking| (booking.item_id, booking))
        .collect()
}

#[async_trait]
impl ItemsService for PgItemsService {
    async fn create_item(
        &self,
        owner: UserId,
        item: NewItem,
    ) -> Result<ItemRecord, ItemsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, owner).await?;

        if let Some(request) = item.request_id
            && !self.requests_repository.request_exists(&mut tx, request).await?
        {
            return Err(ItemsServiceError::RequestNotFound);
        }

        let created = self.items_repository.create_item(&mut tx, owner, item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_item(
        &self,
        item: ItemId,
        owner: UserId,
        update: ItemUpdate,
    ) -> Result<ItemRecord, ItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.items_repository.get_item(&mut tx, item).await?;

        if existing.owner_id != owner {
            return Err(ItemsServiceError::Forbidden);
        }

        let updated = self
            .items_repository
            .update_item(&mut tx, item, update.without_blanks())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn get_item(
        &self,
        item: ItemId,
        actor: UserId,
        point_in_time: Timestamp,
    ) -> Result<ItemDetails, ItemsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, actor).await?;

        let item = self.items_repository.get_item(&mut tx, item).await?;
        let is_owner = item.owner_id == actor;

        let details = self
            .with_details(&mut tx, vec![item], is_owner, point_in_time)
            .await?
            .pop()
            .ok_or(ItemsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(details)
    }

    async fn list_owner_items(
        &self,
        owner: UserId,
        point_in_time: Timestamp,
    ) -> Result<Vec<ItemDetails>, ItemsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, owner).await?;

        let items = self.items_repository.list_owner_items(&mut tx, owner).await?;

        let details = self
            .with_details(&mut tx, items, true, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn search_items(
        &self,
        actor: UserId,
        text: String,
    ) -> Result<Vec<ItemRecord>, ItemsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, actor).await?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items = self.items_repository.search_items(&mut tx, &text).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn add_comment(
        &self,
        item: ItemId,
        author: UserId,
        comment: NewComment,
        now: Timestamp,
    ) -> Result<CommentRecord, ItemsServiceError> {
        let mut tx = self.db.begin().await?;

        self.items_repository.get_item(&mut tx, item).await?;
        self.ensure_user(&mut tx, author).await?;

        let has_completed_booking = self
            .bookings_repository
            .has_completed_booking(&mut tx, item, author, now)
            .await?;

        if !has_completed_booking {
            return Err(ItemsServiceError::NoCompletedBooking);
        }

        let created = self
            .comments_repository
            .create_comment(&mut tx, item, author, comment)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

/// Item listings, search and comments.
#[automock]
#[async_trait]
pub trait ItemsService: Send + Sync {
    /// Lists a new item for `owner`.
    async fn create_item(
        &self,
        owner: UserId,
        item: NewItem,
    ) -> Result<ItemRecord, ItemsServiceError>;

    /// Updates an item on behalf of its owner.
    async fn update_item(
        &self,
        item: ItemId,
        owner: UserId,
        update: ItemUpdate,
    ) -> Result<ItemRecord, ItemsServiceError>;

    /// Retrieves an item with its comments. Last/next bookings are only
    /// attached when `actor` owns the item.
    async fn get_item(
        &self,
        item: ItemId,
        actor: UserId,
        point_in_time: Timestamp,
    ) -> Result<ItemDetails, ItemsServiceError>;

    /// Retrieves the owner's items, ordered by id, with bookings and comments.
    async fn list_owner_items(
        &self,
        owner: UserId,
        point_in_time: Timestamp,
    ) -> Result<Vec<ItemDetails>, ItemsServiceError>;

    /// Searches available items by name or description.
    async fn search_items(
        &self,
        actor: UserId,
        text: String,
    ) -> Result<Vec<ItemRecord>, ItemsServiceError>;

    /// Comments on an item the author has finished an approved booking of,
    /// meaning the booking ended before `now`.
    async fn add_comment(
        &self,
        item: ItemId,
        author: UserId,
        comment: NewComment,
        now: Timestamp,
    ) -> Result<CommentRecord, ItemsServiceError>;
}
