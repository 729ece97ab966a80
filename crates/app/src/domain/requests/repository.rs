//! Requests Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    requests::{
        data::NewRequest,
        records::{RequestId, RequestRecord},
    },
    users::records::UserId,
};

const CREATE_REQUEST_SQL: &str = include_str!("sql/create_request.sql");
const GET_REQUEST_SQL: &str = include_str!("sql/get_request.sql");
const LIST_OWN_REQUESTS_SQL: &str = include_str!("sql/list_own_requests.sql");
const LIST_OTHER_REQUESTS_SQL: &str = include_str!("sql/list_other_requests.sql");
const REQUEST_EXISTS_SQL: &str = include_str!("sql/request_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRequestsRepository;

impl PgRequestsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requestor: UserId,
        request: NewRequest,
    ) -> Result<RequestRecord, sqlx::Error> {
        query_as::<Postgres, RequestRecord>(CREATE_REQUEST_SQL)
            .bind(requestor.into_i64())
            .bind(request.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: RequestId,
    ) -> Result<RequestRecord, sqlx::Error> {
        query_as::<Postgres, RequestRecord>(GET_REQUEST_SQL)
            .bind(request.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Requests posted by `requestor`, newest first.
    pub(crate) async fn list_own_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requestor: UserId,
    ) -> Result<Vec<RequestRecord>, sqlx::Error> {
        query_as::<Postgres, RequestRecord>(LIST_OWN_REQUESTS_SQL)
            .bind(requestor.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Requests posted by anyone except `user`, newest first.
    pub(crate) async fn list_other_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<RequestRecord>, sqlx::Error> {
        query_as::<Postgres, RequestRecord>(LIST_OTHER_REQUESTS_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn request_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: RequestId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(REQUEST_EXISTS_SQL)
            .bind(request.into_i64())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RequestRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: RequestId::from_i64(row.try_get("id")?),
            requestor_id: UserId::from_i64(row.try_get("requestor_id")?),
            description: row.try_get("description")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
