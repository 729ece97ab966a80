//! Comments Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    domain::{
        items::{
            data::NewComment,
            records::{CommentId, CommentRecord, ItemId},
        },
        users::records::UserId,
    },
    ids::raw_ids,
};

const CREATE_COMMENT_SQL: &str = include_str!("../sql/create_comment.sql");
const LIST_ITEM_COMMENTS_SQL: &str = include_str!("../sql/list_item_comments.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCommentsRepository;

impl PgCommentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_comment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemId,
        author: UserId,
        comment: NewComment,
    ) -> Result<CommentRecord, sqlx::Error> {
        query_as::<Postgres, CommentRecord>(CREATE_COMMENT_SQL)
            .bind(item.into_i64())
            .bind(author.into_i64())
            .bind(comment.text)
            .fetch_one(&mut **tx)
            .await
    }

    /// Comments on any of `items`, oldest first.
    pub(crate) async fn list_item_comments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[ItemId],
    ) -> Result<Vec<CommentRecord>, sqlx::Error> {
        query_as::<Postgres, CommentRecord>(LIST_ITEM_COMMENTS_SQL)
            .bind(raw_ids(items.iter().copied()))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CommentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CommentId::from_i64(row.try_get("id")?),
            item_id: ItemId::from_i64(row.try_get("item_id")?),
            author_id: UserId::from_i64(row.try_get("author_id")?),
            author_name: row.try_get("author_name")?,
            text: row.try_get("text")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
