//! Requests service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        items::{records::ItemRecord, repositories::PgItemsRepository},
        requests::{
            data::NewRequest,
            errors::RequestsServiceError,
            records::{RequestId, RequestRecord},
            repository::PgRequestsRepository,
        },
        users::{records::UserId, repository::PgUsersRepository},
    },
};

/// [`RequestsService`] backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgRequestsService {
    db: Db,
    requests_repository: PgRequestsRepository,
    items_repository: PgItemsRepository,
    users_repository: PgUsersRepository,
}

impl PgRequestsService {
    /// Creates the service over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            requests_repository: PgRequestsRepository::new(),
            items_repository: PgItemsRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }

    async fn ensure_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<(), RequestsServiceError> {
        if self.users_repository.user_exists(tx, user).await? {
            Ok(())
        } else {
            Err(RequestsServiceError::UserNotFound)
        }
    }

    /// Fills in the items listed for each request with a single query.
    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut requests: Vec<RequestRecord>,
    ) -> Result<Vec<RequestRecord>, sqlx::Error> {
        if requests.is_empty() {
            return Ok(requests);
        }

        let ids: Vec<RequestId> = requests.iter().map(|request| request.id).collect();

        let mut items: FxHashMap<RequestId, Vec<ItemRecord>> = FxHashMap::default();

        for item in self.items_repository.list_request_items(tx, &ids).await? {
            if let Some(request) = item.request_id {
                items.entry(request).or_default().push(item);
            }
        }

        for request in &mut requests {
            request.items = items.remove(&request.id).unwrap_or_default();
        }

        Ok(requests)
    }
}

#[async_trait]
impl RequestsService for PgRequestsService {
    async fn create_request(
        &self,
        requestor: UserId,
        request: NewRequest,
    ) -> Result<RequestRecord, RequestsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, requestor).await?;

        let created = self
            .requests_repository
            .create_request(&mut tx, requestor, request)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_own_requests(
        &self,
        requestor: UserId,
    ) -> Result<Vec<RequestRecord>, RequestsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, requestor).await?;

        let requests = self
            .requests_repository
            .list_own_requests(&mut tx, requestor)
            .await?;

        let requests = self.with_items(&mut tx, requests).await?;

        tx.commit().await?;

        Ok(requests)
    }

    async fn list_other_requests(
        &self,
        user: UserId,
    ) -> Result<Vec<RequestRecord>, RequestsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, user).await?;

        let requests = self
            .requests_repository
            .list_other_requests(&mut tx, user)
            .await?;

        let requests = self.with_items(&mut tx, requests).await?;

        tx.commit().await?;

        Ok(requests)
    }

    async fn get_request(
        &self,
        request: RequestId,
        actor: UserId,
    ) -> Result<RequestRecord, RequestsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_user(&mut tx, actor).await?;

        let request = self.requests_repository.get_request(&mut tx, request).await?;

        let request = self
            .with_items(&mut tx, vec![request])
            .await?
            .pop()
            .ok_or(RequestsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(request)
    }
}

/// Requests for items nobody has listed yet.
#[automock]
#[async_trait]
pub trait RequestsService: Send + Sync {
    /// Posts a request for an item on behalf of `requestor`.
    async fn create_request(
        &self,
        requestor: UserId,
        request: NewRequest,
    ) -> Result<RequestRecord, RequestsServiceError>;

    /// The requestor's own requests, newest first, with the items listed for them.
    async fn list_own_requests(
        &self,
        requestor: UserId,
    ) -> Result<Vec<RequestRecord>, RequestsServiceError>;

    /// Everyone else's requests, newest first, with the items listed for them.
    async fn list_other_requests(
        &self,
        user: UserId,
    ) -> Result<Vec<RequestRecord>, RequestsServiceError>;

    /// Retrieve a single request with its items.
    async fn get_request(
        &self,
        request: RequestId,
        actor: UserId,
    ) -> Result<RequestRecord, RequestsServiceError>;
}
