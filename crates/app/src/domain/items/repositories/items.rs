//! Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    domain::{
        items::{
            data::{ItemUpdate, NewItem},
            records::{ItemId, ItemRecord},
        },
        requests::records::RequestId,
        users::records::UserId,
    },
    ids::raw_ids,
};

const CREATE_ITEM_SQL: &str = include_str!("../sql/create_item.sql");
const GET_ITEM_SQL: &str = include_str!("../sql/get_item.sql");
const UPDATE_ITEM_SQL: &str = include_str!("../sql/update_item.sql");
const LIST_OWNER_ITEMS_SQL: &str = include_str!("../sql/list_owner_items.sql");
const SEARCH_ITEMS_SQL: &str = include_str!("../sql/search_items.sql");
const LIST_REQUEST_ITEMS_SQL: &str = include_str!("../sql/list_request_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgItemsRepository;

impl PgItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
        item: NewItem,
    ) -> Result<ItemRecord, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(CREATE_ITEM_SQL)
            .bind(owner.into_i64())
            .bind(item.request_id.map(RequestId::into_i64))
            .bind(item.name)
            .bind(item.description)
            .bind(item.available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemId,
    ) -> Result<ItemRecord, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(GET_ITEM_SQL)
            .bind(item.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Like [`Self::get_item`], for callers outside the items domain that
    /// report a missing item in their own terms.
    pub(crate) async fn find_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemId,
    ) -> Result<Option<ItemRecord>, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(GET_ITEM_SQL)
            .bind(item.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemId,
        update: ItemUpdate,
    ) -> Result<ItemRecord, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(UPDATE_ITEM_SQL)
            .bind(item.into_i64())
            .bind(update.name)
            .bind(update.description)
            .bind(update.available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_owner_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
    ) -> Result<Vec<ItemRecord>, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(LIST_OWNER_ITEMS_SQL)
            .bind(owner.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Available items whose name or description contains `text`, ignoring case.
    pub(crate) async fn search_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        text: &str,
    ) -> Result<Vec<ItemRecord>, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(SEARCH_ITEMS_SQL)
            .bind(contains_pattern(text))
            .fetch_all(&mut **tx)
            .await
    }

    /// Items listed in answer to any of `requests`.
    pub(crate) async fn list_request_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requests: &[RequestId],
    ) -> Result<Vec<ItemRecord>, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(LIST_REQUEST_ITEMS_SQL)
            .bind(raw_ids(requests.iter().copied()))
            .fetch_all(&mut **tx)
            .await
    }
}

/// `LIKE` pattern matching `text` anywhere, with wildcards in `text` taken literally.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);

    pattern.push('%');

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}

impl<'r> FromRow<'r, PgRow> for ItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ItemId::from_i64(row.try_get("id")?),
            owner_id: UserId::from_i64(row.try_get("owner_id")?),
            request_id: row
                .try_get::<Option<i64>, _>("request_id")?
                .map(RequestId::from_i64),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            available: row.try_get("available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
